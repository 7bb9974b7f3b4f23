use std::io::Cursor;
use std::sync::Arc;

use rocket::data::{Data, Limits};
use rocket::http::uri::Origin;
use rocket::http::{Method, Status};
use rocket::route::{Handler, Outcome, Route};
use rocket::{Build, Request as HttpRequest, Response as HttpResponse, Rocket};

use super::{ErrorKind, Result, Settings};
use crate::slack::slash_command::{FormValues, Request};
use crate::slack::Response;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Every method is routed so that anything but POST gets a 405 instead of
/// falling through to Rocket's 404 catcher.
const METHODS: [Method; 9] = [
    Method::Get,
    Method::Put,
    Method::Post,
    Method::Delete,
    Method::Options,
    Method::Head,
    Method::Trace,
    Method::Connect,
    Method::Patch,
];

/// Answers slash commands.
///
/// Returning `None` acknowledges the command with an empty body.
pub trait CommandHandler: Send + Sync + 'static {
    fn handle(&self, request: Request) -> Option<Response>;
}

impl<F> CommandHandler for F
where
    F: Fn(Request) -> Option<Response> + Send + Sync + 'static,
{
    fn handle(&self, request: Request) -> Option<Response> {
        self(request)
    }
}

/// Rocket handler that turns each slash command webhook into one call of a
/// `CommandHandler`. The security token is not verified.
#[derive(Clone)]
pub struct App {
    handler: Arc<dyn CommandHandler>,
}

impl App {
    pub fn new<H: CommandHandler>(handler: H) -> App {
        App {
            handler: Arc::new(handler),
        }
    }

    pub fn routes(&self, path: &str) -> Result<Vec<Route>> {
        if let Err(e) = Origin::parse(path) {
            bail!(ErrorKind::InvalidPath(format!("{} ({})", path, e)));
        }
        Ok(METHODS
            .iter()
            .map(|&method| Route::new(method, path, self.clone()))
            .collect())
    }

    pub fn rocket(self, settings: &Settings) -> Result<Rocket<Build>> {
        let routes = self.routes(&settings.path)?;
        let figment = rocket::Config::figment()
            .merge(("address", settings.address.clone()))
            .merge(("port", settings.port));
        Ok(rocket::custom(figment).mount("/", routes))
    }

    fn dispatch(&self, request: Request) -> Result<Option<Vec<u8>>> {
        debug!(
            "dispatching {} from team {} in channel {}",
            request.command, request.team.id, request.channel.id
        );
        let response = match self.handler.handle(request) {
            Some(response) => response,
            None => return Ok(None),
        };
        let mut body = serde_json::to_vec(&response)?;
        body.push(b'\n');
        Ok(Some(body))
    }
}

#[rocket::async_trait]
impl Handler for App {
    async fn handle<'r>(&self, req: &'r HttpRequest<'_>, data: Data<'r>) -> Outcome<'r> {
        if req.method() != Method::Post {
            debug!("rejecting {} {}", req.method(), req.uri());
            return Outcome::Success(
                HttpResponse::build()
                    .status(Status::MethodNotAllowed)
                    .finalize(),
            );
        }

        let form = read_form(req, data).await;
        match self.dispatch(Request::from_form(&form)) {
            Ok(Some(body)) => Outcome::Success(
                HttpResponse::build()
                    .raw_header("Content-Type", JSON_CONTENT_TYPE)
                    .sized_body(body.len(), Cursor::new(body))
                    .finalize(),
            ),
            Ok(None) => Outcome::Success(HttpResponse::new()),
            Err(e) => {
                error!("failed to encode slash command response: {}", e);
                Outcome::Error(Status::InternalServerError)
            }
        }
    }
}

/// Reads the body as a urlencoded form. Other content types, unreadable and
/// oversized bodies give whatever could be decoded, possibly nothing.
async fn read_form(req: &HttpRequest<'_>, data: Data<'_>) -> FormValues {
    if !req.content_type().map_or(false, |ct| ct.is_form()) {
        return FormValues::default();
    }

    let limit = req.limits().get("form").unwrap_or(Limits::FORM);
    match data.open(limit).into_bytes().await {
        Ok(body) => {
            if !body.is_complete() {
                warn!("form body exceeds {}, decoding truncated data", limit);
            }
            FormValues::parse(&body.value)
        }
        Err(e) => {
            warn!("failed to read form body: {}", e);
            FormValues::default()
        }
    }
}
