use clap::Parser;
use clippin_lib::bootstrap::{run_app, Cli};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run_app(cli) {
        eprintln!("clippin: {e:#}");
        std::process::exit(1);
    }
}
