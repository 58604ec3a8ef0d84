use std::io::Write as _;
use std::time::Duration;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::chat::Session;
use crate::core::AppConfig;
use crate::render::Typewriter;

pub async fn run() -> Result<()> {
    let mut rl = DefaultEditor::new().expect("Editor failed");

    let config = AppConfig::default();
    let mut session = Session::builder(
        &config.openai_api_hostname,
        &config.openai_api_key,
        &config.openai_model,
    )
    .build();
    let mut typewriter = Typewriter::with_tick(Duration::from_millis(config.typewriter_tick_ms));

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => match session.submit(line.as_str()).await {
                Ok(reply) => {
                    let (tx, mut rx) = mpsc::unbounded_channel();
                    typewriter.start(&reply, tx);

                    // Frames are growing prefixes; print only the new tail
                    let mut printed = 0;
                    while let Some(frame) = rx.recv().await {
                        print!("{}", &frame[printed..]);
                        std::io::stdout().flush()?;
                        printed = frame.len();
                    }
                    println!();
                }
                Err(err) => {
                    // The failed turn is over; the session stays usable
                    println!("Error: {:?}", err);
                }
            },
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
