//! talkscope CLI binary entrypoint.

fn main() {
    if let Err(err) = talkscope_cli::app::run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
