fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match dirhop_core::runtime::parse_cli_args(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("[dirhop] {error}");
            std::process::exit(2);
        }
    };

    if let Err(error) = dirhop_core::runtime::run_with_options(options) {
        eprintln!("[dirhop] {error}");
        std::process::exit(1);
    }
}
