use std::io::{self, BufRead, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use math_solver::error::print_error_with_context;
use math_solver::{Compilation, Session};

/// 日志过滤器使用的环境变量
const LOG_ENV: &str = "MATHC_LOG";

/// 编译并求值一条简单的算术赋值语句，例如 `int y = 4 + 3;`
#[derive(Parser, Debug)]
#[command(name = "mathc", version, about, long_about = None)]
struct Args {
    /// 要编译的语句；省略时进入交互模式
    source: Option<String>,

    /// 输出各阶段的调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 只输出最终结果
    #[arg(short, long)]
    quiet: bool,

    /// 不输出三地址码
    #[arg(long)]
    no_ir: bool,

    /// 不输出伪汇编
    #[arg(long)]
    no_asm: bool,
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))
}

fn print_banner() {
    println!();
    println!("Welcome to Math Solver where we will solve your simple math.");
    println!("Write your math problem in the following format.");
    println!("(type)(identifier)=(int/double)(operation +,-,*,/)(int/double);");
    println!("Example 1: int x=1+1;");
    println!("Example 2: double y=2.0+2.0;");
    println!("The answer will be printed as x=2; y=4.0;");
    println!("Type ':symbols' to list declared variables, 'q' to quit.");
}

fn print_compilation(out: &Compilation, args: &Args) {
    if !args.quiet {
        if !args.no_ir {
            println!("Three-address code:");
            for line in &out.ir {
                println!("  {}", line);
            }
        }
        if !args.no_asm {
            println!("Assembly:");
            for line in &out.assembly {
                println!("  {}", line);
            }
        }
    }
    println!("{}", out.result_line());
}

/// 编译一条语句并打印结果，返回是否成功
fn run_once(session: &mut Session, source: &str, args: &Args) -> bool {
    if !args.quiet {
        println!("=== Starting Compilation Steps ===");
    }

    match session.compile(source) {
        Ok(out) => {
            print_compilation(&out, args);
            if !args.quiet {
                println!("=== Compilation Successfully Completed ===");
            }
            true
        }
        Err(e) => {
            eprintln!("{} failed.", capitalize(&e.phase().to_string()));
            print_error_with_context(&e, source);
            eprintln!("=== Compilation Failed ===");
            false
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn repl(args: &Args) -> Result<()> {
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut input = String::new();

    print_banner();

    loop {
        print!("Enter a simple math expression (or type 'q' to quit): ");
        io::stdout().flush().context("failed to flush stdout")?;

        input.clear();
        let read = stdin
            .lock()
            .read_line(&mut input)
            .context("failed to read from stdin")?;
        if read == 0 {
            println!();
            break;
        }

        let line = input.trim();
        if line.eq_ignore_ascii_case("q") {
            println!("Exiting program...");
            break;
        }
        if line.is_empty() {
            println!("Invalid input. Try again.\n");
            continue;
        }
        if line == ":symbols" {
            if session.symbols().is_empty() {
                println!("(no variables declared)");
            }
            for entry in session.symbols().entries() {
                println!("  {}: {}", entry.name, entry.symbol_type);
            }
            continue;
        }

        run_once(&mut session, line, args);
        println!();
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    match &args.source {
        Some(source) => {
            let mut session = Session::new();
            if !run_once(&mut session, source, &args) {
                process::exit(1);
            }
            Ok(())
        }
        None => repl(&args),
    }
}
