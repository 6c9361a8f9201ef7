use std::{
    env,
    path::{Path, PathBuf},
};

use argh::FromArgs;

type DynError = Box<dyn std::error::Error>;

#[derive(FromArgs, PartialEq, Debug)]
/// Developer automation for the ink-lang workspace.
struct Args {
    #[argh(subcommand)]
    subcommand: SubCommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
enum SubCommand {
    ContinuousIntegration(CIArgs),
    Coverage(CoverageArgs),
}

#[derive(FromArgs, PartialEq, Debug)]
/// Run the continuous integration validation checks.
#[argh(subcommand, name = "ci")]
struct CIArgs {
    #[argh(switch)]
    /// attempt to automatically fix format and clippy findings.
    fix: bool,
}

#[derive(FromArgs, PartialEq, Debug)]
/// Collect test coverage data.
#[argh(subcommand, name = "cov")]
struct CoverageArgs {
    #[argh(switch)]
    /// produce an html report instead of the default .lcov file.
    html: bool,
}

fn main() -> Result<(), DynError> {
    let args: Args = argh::from_env();
    match args.subcommand {
        SubCommand::ContinuousIntegration(ci_args) => ci(ci_args.fix),
        SubCommand::Coverage(cov_args) => coverage(cov_args.html),
    }
}

fn ci(fix: bool) -> Result<(), DynError> {
    let cargo = cargo();

    if fix {
        println!("** fixing code formatting with `cargo fmt --all`");
        duct::cmd!(&cargo, "fmt", "--all").run()?;
        println!("** fixing clippy findings with `cargo clippy --fix`");
        duct::cmd!(&cargo, "clippy", "--fix").run()?;
    } else {
        println!("** checking code formatting with `cargo fmt --all -- --check`");
        duct::cmd!(&cargo, "fmt", "--all", "--", "--check").run()?;
        println!("** linting with `cargo clippy -- --deny clippy::all`");
        duct::cmd!(&cargo, "clippy", "--", "--deny", "clippy::all").run()?;
    }

    println!("** building and testing with `RUSTFLAGS=\"-D warnings\" cargo test`");
    duct::cmd!(&cargo, "test").env("RUSTFLAGS", "-D warnings").run()?;

    println!("** all checks passed!");
    Ok(())
}

fn coverage(html: bool) -> Result<(), DynError> {
    let cov_path = project_root().join("target").join("coverage");
    fs_extra::dir::create_all(&cov_path, true)?;

    // Collect the coverage information by invoking `cargo test` with the
    // instrumentation environment variables set.
    println!("** collecting coverage information.");
    duct::cmd!(cargo(), "test", "--tests")
        .env("CARGO_INCREMENTAL", "0")
        .env("RUSTFLAGS", "-C instrument-coverage")
        .env("LLVM_PROFILE_FILE", "cargo-test-%p-%m.profraw")
        .run()?;

    // Coallate the coverage data with grcov, as an html report or lcov file.
    println!("** coallating coverage data.");
    let (output_format, output_path) = if html {
        ("html", cov_path.join("html"))
    } else {
        ("lcov", cov_path.join("tests.lcov"))
    };
    duct::cmd!(
        "grcov",
        ".",
        "--binary-path",
        project_root().join("target").join("debug").join("deps"),
        "-s",
        ".",
        "-t",
        output_format,
        "--branch",
        "--ignore-not-existing",
        "--ignore", // ignore stuff outside root project directory
        "../*",
        "--ignore", // ignore stuff with a fully specified path (likely system libs)
        "/*",
        "--ignore", // ignore everything in this xtask folder
        "xtask/*",
        "--ignore", // ignore the fuzzing harness, it has its own workspace
        "fuzz/*",
        "--ignore", // ignore integration test code, this always runs in a test build!
        "lang/tests/*",
        "--ignore", // ignore benchmark code, it is not exercised in test
        "lang/benches/*",
        "--ignore", // ignore the binaries, they aren't exercised in test
        "lang/src/bin/*",
        "--ignore", // ignore the unittest code, always runs.
        "*_unittests.rs",
        "-o",
        output_path,
    )
    .run()?;

    // Cleanup any .profraw files left behind in the project.
    println!("** cleaning up *.profraw files.");
    let profraw_files: Result<Vec<PathBuf>, _> = glob::glob("**/*.profraw")?.collect();
    profraw_files?.iter().try_for_each(fs_extra::file::remove)?;

    if html {
        println!("** done. Generated coverage report in target/coverage/html/index.html.");
    } else {
        println!("** done. Machine-readable coverage report in target/coverage/tests.lcov");
    }
    Ok(())
}

fn project_root() -> PathBuf {
    Path::new(&env!("CARGO_MANIFEST_DIR")).ancestors().nth(1).unwrap().to_path_buf()
}

fn cargo() -> String {
    env::var("CARGO").unwrap_or_else(|_| "cargo".to_string())
}
