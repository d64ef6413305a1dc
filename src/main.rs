use patientflow::display::{print_queue, write_queue_report};
use patientflow::queue::QueueStore;
use patientflow::web::start_server;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let queue_file =
        std::env::var("QUEUE_FILE").unwrap_or_else(|_| "queue_data.json".to_string());

    // Check if we should run in web mode
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        println!("Starting PatientFlow on port {}...", port);
        println!("Patient booking: http://localhost:{}/", port);
        println!("Staff queue:     http://localhost:{}/staff", port);

        start_server(port, queue_file.into()).await?;
        return Ok(());
    }

    // CLI mode: one-shot view of the queue file
    let store = QueueStore::new(queue_file);
    let records = store.load_sorted()?;

    print_queue(&records);

    write_queue_report(&records, "queue_report.txt")?;
    println!("\nReport saved to queue_report.txt");

    Ok(())
}
