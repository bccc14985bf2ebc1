//! Line-oriented interactive loop over one client.

use std::io::Write;

use ragtube_client::{History, RagtubeClient, SessionPhase};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

/// Questions listed by `/history`.
const HISTORY_LISTING: usize = 8;

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Load(&'a str),
    History,
    Clear,
    Quit,
    Question(&'a str),
    Empty,
}

fn parse(line: &str) -> Input<'_> {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some(("/load", url)) => Input::Load(url.trim()),
        _ => match line {
            "" => Input::Empty,
            "/load" => Input::Load(""),
            "/history" => Input::History,
            "/clear" => Input::Clear,
            "/quit" | "/exit" => Input::Quit,
            question => Input::Question(question),
        },
    }
}

pub async fn run(client: &RagtubeClient) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut history = History::new();
    let mut video_loaded = false;

    println!("RagTube: /load <url> to ingest a video, then ask away. /quit to leave.");
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse(&line) {
            Input::Empty => {}
            Input::Quit => break,
            Input::Load("") => eprintln!("Enter a URL"),
            Input::Load(url) => {
                if crate::ingest(client, url).await {
                    video_loaded = true;
                }
            }
            Input::History => {
                if history.is_empty() {
                    println!("No queries yet");
                }
                for question in history.recent_questions(HISTORY_LISTING) {
                    println!("• {question}...");
                }
            }
            Input::Clear => {
                history.clear();
                println!("History cleared");
            }
            Input::Question(_) if !video_loaded => eprintln!("Load a video first"),
            Input::Question(question) => {
                let phase = render::stream_answer(client, question).await?;
                if phase == SessionPhase::Completed {
                    history.record(question, client.surface().snapshot().answer);
                }
            }
        }
    }
    Ok(())
}
