use std::env;
use std::io;
use std::process::ExitCode;

use change_eng::Engine;
use change_eng::config::Config;
use change_eng::csv::{ReceiptWriter, read_requests, read_stock};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    if config.input.extension().is_none_or(|ext| ext != "csv") {
        warn!(path = %config.input.display(), "input file seems to not be a csv file");
    }

    let mut engine = Engine::new(config.currency, config.stock);

    if let Some(path) = &config.restock {
        let stacks = match read_stock(path) {
            Ok(stacks) => stacks,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = engine.restock(&stacks) {
            error!(path = %path.display(), "restock rejected: {e}");
            return ExitCode::FAILURE;
        }
    }

    let requests = match read_requests(config.input.clone()) {
        Ok(requests) => requests,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let (request_sender, request_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in requests {
            match result {
                Ok(request) => {
                    if request_sender.send(request).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    let stdout = io::stdout();
    let mut writer = ReceiptWriter::new(stdout.lock());
    engine
        .run(ReceiverStream::new(request_receiver), |receipt| {
            if let Err(e) = writer.write(&receipt) {
                warn!(request = receipt.request, "failed to write receipt: {e}");
            }
        })
        .await;

    if let Err(e) = writer.flush() {
        error!("failed to flush output: {e}");
        return ExitCode::FAILURE;
    }

    for stack in engine.inventory_report() {
        info!(
            denomination = stack.denomination,
            remaining = stack.remaining,
            "final inventory"
        );
    }
    info!(total = %engine.total_value(), "final inventory value");

    ExitCode::SUCCESS
}
