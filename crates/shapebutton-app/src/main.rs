//! Main application entry point (native).

use shapebutton_app::{PreviewArgs, format_report, run};

fn main() {
    env_logger::init();

    let result = PreviewArgs::parse(std::env::args().skip(1)).and_then(|args| run(&args));
    match result {
        Ok(report) => print!("{}", format_report(&report)),
        Err(e) => {
            log::error!("Preview failed: {}", e);
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
