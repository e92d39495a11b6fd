fn main() {
    bqb_cli::init_logging();
    if let Err(e) = bqb_cli::run(std::env::args().collect()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
