extern crate chrono;
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate rocket;
extern crate slackbot;

use error_chain::ChainedError;
use slackbot::slack::slash_command::Request;
use slackbot::slack::{Attachment, Field, Response, User};
use slackbot::{App, ErrorKind, Result, Settings};

#[rocket::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}", e.display_chain());
        ::std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let settings = Settings::try_new()?;
    let rocket = App::new(handle_command).rocket(&settings)?;
    info!("answering slash commands at {}", settings.path);
    rocket
        .launch()
        .await
        .map_err(|e| ErrorKind::Launch(e.to_string()))?;
    Ok(())
}

fn handle_command(request: Request) -> Option<Response> {
    let text = request.text.trim();
    let (verb, args) = match text.find(char::is_whitespace) {
        Some(i) => (&text[..i], text[i..].trim()),
        None => (text, ""),
    };

    match verb {
        "ping" => Some(Response::ephemeral("pong")),
        "whois" if !args.is_empty() => Some(whois_message(&request, &User::parse(args))),
        "ack" => None,
        _ => Some(help_message(&request.command)),
    }
}

fn whois_message(request: &Request, user: &User) -> Response {
    let mut a = Attachment {
        color: "good".to_owned(),
        fields: vec![
            Field::new("ID", if user.id.is_empty() { "-" } else { user.id.as_str() }, true),
            Field::new("Name", if user.name.is_empty() { "-" } else { user.name.as_str() }, true),
        ],
        footer: format!("asked by {}", request.user.name),
        ..Attachment::new(format!("{} ({})", user.name, user.id))
    };
    a.set_timestamp(&chrono::Utc::now());
    Response {
        attachments: vec![a],
        ..Response::in_channel("")
    }
}

fn help_message(command: &str) -> Response {
    Response::ephemeral(format!(
        "{0} ping # check that the bot is alive
{0} whois <@user> # show the id and name of a mentioned user
{0} ack # acknowledge without replying
{0} help # show this message",
        command
    ))
}
