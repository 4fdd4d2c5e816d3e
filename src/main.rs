use nsot::cli::execute_command;

/// Main entry point for the program
#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = execute_command(std::env::args_os()).await {
        eprintln!("{}", e);
        ::std::process::exit(e.exit_code().code());
    }
}
