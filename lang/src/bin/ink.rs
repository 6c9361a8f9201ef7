use ink_lang::toolchain;
use ink_lang::toolchain::lexer::LexerOptions;

const HELP: &str = "\
    ink - the Ink language tokenizer

    USAGE:
        ink [--phase PHASE] [--debug-lexer] [--fatal-error] [--quiet] FILENAME

    OPTIONS:
        --phase PHASE       Which compilation phase to take the input through. PHASE is
                            currently only 'lex'.
        --debug-lexer       Trace each token to stderr as it is produced.
        --fatal-error       Exit immediately after the first syntax error.
        --quiet             If present, all non-error output is suppressed.

    ARGS:
        FILENAME            The path to the ink file to tokenize, or supply '-' to take
                            input from stdin.
";

#[derive(Debug, Eq, PartialEq)]
enum CompilationPhase {
    Lex,
}

#[derive(Debug, Eq, PartialEq)]
struct InkArgs {
    phase: Option<CompilationPhase>,
    debug_lexer: bool,
    fatal_error: bool,
    quiet: bool,
    source_file: std::path::PathBuf,
}

fn main() {
    let args = match parse_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            std::process::exit(1);
        }
    };

    // Holds stdin input for the duration of the scan, when reading from '-'.
    let stdin_source;
    let source = if args.source_file == std::path::Path::new("-") {
        stdin_source = match std::io::read_to_string(std::io::stdin()) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
        };
        toolchain::source::SourceBuffer::new_from_string(&stdin_source, "<stdin>")
    } else {
        toolchain::source::SourceBuffer::new_from_file(&args.source_file)
    };
    let source = match source {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error opening source file {}: {}", args.source_file.display(), e);
            std::process::exit(1);
        }
    };

    let options = LexerOptions { fatal_errors: args.fatal_error, debug_tokens: args.debug_lexer };
    let mut diags = toolchain::diagnostics::console_diagnostic_consumer();
    let tb = toolchain::lexer::TokenizedBuffer::tokenize(&source, options, &mut diags);
    if args.phase.unwrap_or(CompilationPhase::Lex) == CompilationPhase::Lex && !args.quiet {
        println!("TokenizedBuffer [");
        tb.print_tokens();
        println!("]");
    }
}

fn parse_args() -> Result<InkArgs, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let args = InkArgs {
        phase: pargs.opt_value_from_fn("--phase", parse_phase)?,
        debug_lexer: pargs.contains("--debug-lexer"),
        fatal_error: pargs.contains("--fatal-error"),
        quiet: pargs.contains("--quiet"),
        source_file: pargs.free_from_str()?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        eprintln!("Error: unused arguments left: {:?}.", remaining);
        std::process::exit(1);
    }
    Ok(args)
}

fn parse_phase(s: &str) -> Result<CompilationPhase, &'static str> {
    match s {
        "lex" => Ok(CompilationPhase::Lex),
        _ => Err("unrecognized compilation phase."),
    }
}
