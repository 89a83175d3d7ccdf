use crate::fs::{FileSystem, RealFileSystem};
use crate::progress::{ConsoleProgress, Progress};
use crate::{error, load, trace, work};

/// Rule file read when `-f` isn't given.
pub const DEFAULT_RULE_FILE: &str = "nmakefile";

#[derive(argh::FromArgs)]
/// nmake, prints the commands that would bring targets up to date
struct Args {
    /// rule file [default=nmakefile]
    #[argh(option, short = 'f', default = "DEFAULT_RULE_FILE.to_owned()")]
    file: String,

    /// debugging tools, use `-d list` to list
    #[argh(option, short = 'd')]
    debug: Option<String>,

    /// targets to bring up to date, in order
    #[argh(positional)]
    targets: Vec<String>,
}

/// Load `rule_file` and resolve each of `targets` in turn.  Targets rebuilt
/// for one request count as already built for the later ones.
pub fn build(
    fs: &dyn FileSystem,
    progress: &mut dyn Progress,
    rule_file: &str,
    targets: &[String],
) -> error::Result<()> {
    let mut graph = trace::scope("load::read", || load::read(fs, rule_file, &mut *progress))?;
    let mut work = work::Work::new(fs, &mut graph, progress);
    for name in targets {
        trace::scope("want_file", || work.want_file(name))?;
        work.reset();
    }
    Ok(())
}

fn parse_args(argv: &[String]) -> anyhow::Result<Result<Args, String>> {
    let strs: Vec<&str> = argv.iter().map(String::as_str).collect();
    let (cmd, rest) = match strs.split_first() {
        Some((cmd, rest)) => (*cmd, rest),
        None => ("nmake", &[][..]),
    };
    match <Args as argh::FromArgs>::from_args(&[cmd], rest) {
        Ok(args) => Ok(Ok(args)),
        // --help and friends.
        Err(exit) if exit.status.is_ok() => Ok(Err(exit.output)),
        Err(exit) => Err(error::Error::Usage(exit.output.trim_end().to_owned()).into()),
    }
}

fn run_impl() -> anyhow::Result<i32> {
    let argv: Vec<String> = std::env::args().collect();
    let args = match parse_args(&argv)? {
        Ok(args) => args,
        Err(help) => {
            print!("{}", help);
            return Ok(0);
        }
    };

    if let Some(debug) = args.debug {
        match debug.as_str() {
            "list" => {
                println!("debug tools:");
                println!("  trace  generate json performance trace");
                return Ok(0);
            }
            "trace" => trace::open("trace.json")?,
            _ => anyhow::bail!("unknown -d {:?}, use -d list to list", debug),
        }
    }

    let fs = RealFileSystem::new();
    let mut progress = ConsoleProgress::new();
    build(&fs, &mut progress, &args.file, &args.targets)?;
    Ok(0)
}

pub fn run() -> anyhow::Result<i32> {
    let res = run_impl();
    trace::close()?;
    res
}
