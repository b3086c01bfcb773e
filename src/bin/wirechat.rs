//! Line-oriented terminal front-end for the wirechat client.
//!
//! Renders the session log to stdout and feeds stdin lines to the session:
//! name lines while the prompt is open, chat lines afterwards. `/quit` or
//! `/exit` leaves the room.

use time::macros::format_description;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use wirechat::channel::ChannelEvent;
use wirechat::config::ChatConfig;
use wirechat::protocol::MessageCategory;
use wirechat::session::{ChatClient, ChatMessage};

/// What the select loop produced on one turn.
enum Input {
    Event(Option<ChannelEvent>),
    Line(Option<String>),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ChatConfig::from_env();
    let mut client = ChatClient::new(&config);

    println!("connecting to {} ...", config.server_url);
    client.connect(&config.server_url).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut rendered = 0;
    let mut prompt_shown = false;
    let mut stdin_open = true;

    loop {
        let input = tokio::select! {
            event = client.run_event() => Input::Event(event),
            line = lines.next_line(), if stdin_open => Input::Line(line.unwrap_or_default()),
        };

        match input {
            Input::Event(None) => break,
            Input::Event(Some(event)) => {
                if event == ChannelEvent::Opened {
                    println!("* connected");
                }
                rendered = render_new(client.session().messages(), rendered);
                if client.session().status().is_closed() {
                    println!("* disconnected");
                    break;
                }
            }
            Input::Line(None) => {
                // stdin closed; leave the room.
                stdin_open = false;
                client.disconnect().await;
            }
            Input::Line(Some(line)) => {
                if client.session().prompt_open() {
                    client.submit_name(&line).await;
                } else {
                    client.submit_input(&line).await;
                }
            }
        }

        prompt_shown = maybe_prompt(&client, prompt_shown);
    }
}

/// Print any log entries appended since the last render pass.
fn render_new(messages: &[ChatMessage], rendered: usize) -> usize {
    for message in &messages[rendered..] {
        println!("{}", render(message));
    }
    messages.len()
}

fn render(message: &ChatMessage) -> String {
    let timestamp = message
        .received_at
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default();
    match message.category {
        MessageCategory::System | MessageCategory::Welcome => format!("-- {} --", message.body),
        MessageCategory::Chat | MessageCategory::PastMessage if message.self_authored => {
            format!("[{timestamp}] you: {}", message.body)
        }
        MessageCategory::Chat | MessageCategory::PastMessage => {
            format!("[{timestamp}] {}: {}", message.sender, message.body)
        }
    }
}

/// Show the name prompt once each time it opens.
fn maybe_prompt(client: &ChatClient, prompt_shown: bool) -> bool {
    if client.session().prompt_open() {
        if !prompt_shown {
            println!("enter your name:");
        }
        true
    } else {
        false
    }
}
