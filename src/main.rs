use clap::Parser;
use listening_history_converter::cli::commands::Cli;
use listening_history_converter::convert;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    println!("{}", "=".repeat(60));
    println!("Listening History JSON to CSV Converter");
    println!("{}", "=".repeat(60));
    println!();

    match convert::run(&cli.input_dir, &cli.output_file) {
        Ok(report) => {
            if report.records_skipped > 0 {
                println!("Skipped {} invalid stream entries", report.records_skipped);
            }
            println!(
                "\n✅ Success! Converted {} streams to {}",
                report.records_written,
                report.output_path.display()
            );
            println!("\nNext steps:");
            println!("1. Move {} to backend/listening_history.csv", report.output_path.display());
            println!("2. Start the analytics backend");
        }
        Err(e) => {
            log::error!("{:?}", e);
            println!("Error: {}", e);
            println!("\n❌ Conversion failed!");
            println!("\nMake sure you have:");
            println!("1. Downloaded your streaming history from your account's privacy settings");
            println!("2. Extracted the ZIP file");
            println!("3. Pointed this tool at the directory containing the JSON files");
            std::process::exit(e.exit_code());
        }
    }
}
