use std::error::Error;

use lsp_server::{Connection, Message, Notification};
use lsp_types::{
	notification::{self, Notification as _, PublishDiagnostics},
	DiagnosticSeverity, DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
	PublishDiagnosticsParams, ServerCapabilities, TextDocumentSyncCapability, TextDocumentSyncKind, Uri,
};

use crate::frontend::{elaborate::elaborate, parse::parse};

type Result<T> = core::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Serves diagnostics over the language server protocol until the client requests shutdown.
pub fn serve() -> Result<()> {
	eprintln!("ctt-ls started");
	let (connection, io_handles) = Connection::stdio();

	let server_capabilities = serde_json::to_value(&ServerCapabilities {
		text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
		..Default::default()
	})?;
	let params = connection.initialize(server_capabilities)?;
	main_loop(&connection, params)?;
	io_handles.join()?;
	eprintln!("ctt-ls terminated");
	Ok(())
}

fn main_loop(connection: &Connection, params: serde_json::Value) -> Result<()> {
	eprintln!("main_loop: params = {params:?}");
	let mut server = Server::new(connection);
	for message in &connection.receiver {
		match message {
			Message::Request(request) => {
				if connection.handle_shutdown(&request)? {
					return Ok(());
				}
				eprintln!("unhandled request: {}", request.method);
			}
			Message::Response(response) => {
				eprintln!("unhandled response: {response:?}");
			}
			Message::Notification(notification) => {
				let method = notification.method.as_str();
				if method == notification::DidOpenTextDocument::METHOD {
					server.process_notification::<notification::DidOpenTextDocument>(Server::did_open, notification)?;
				} else if method == notification::DidChangeTextDocument::METHOD {
					server
						.process_notification::<notification::DidChangeTextDocument>(Server::did_change, notification)?;
				} else if method == notification::DidCloseTextDocument::METHOD {
					server.process_notification::<notification::DidCloseTextDocument>(Server::did_close, notification)?;
				} else {
					eprintln!("unhandled notification: {method}");
				}
			}
		}
	}
	Ok(())
}

struct Server<'a> {
	connection: &'a Connection,
}

impl<'a> Server<'a> {
	fn new(connection: &'a Connection) -> Self { Self { connection } }

	fn process_notification<N>(
		&mut self,
		handler: impl Fn(&mut Self, N::Params) -> Result<()>,
		notification: Notification,
	) -> Result<()>
	where
		N: notification::Notification,
		N::Params: serde::de::DeserializeOwned,
	{
		let params = notification.extract(N::METHOD)?;
		handler(self, params)
	}

	fn did_open(&mut self, params: DidOpenTextDocumentParams) -> Result<()> {
		let diagnostics = check(&params.text_document.text);
		self.publish(params.text_document.uri, diagnostics)
	}

	fn did_change(&mut self, params: DidChangeTextDocumentParams) -> Result<()> {
		// Full synchronization: the last content change carries the entire document.
		let Some(change) = params.content_changes.into_iter().last() else { return Ok(()) };
		self.publish(params.text_document.uri, check(&change.text))
	}

	fn did_close(&mut self, params: DidCloseTextDocumentParams) -> Result<()> {
		self.publish(params.text_document.uri, Vec::new())
	}

	fn publish(&mut self, uri: Uri, diagnostics: Vec<lsp_types::Diagnostic>) -> Result<()> {
		let params = PublishDiagnosticsParams { uri, diagnostics, version: None };
		self.connection.sender.send(Message::Notification(Notification {
			method: PublishDiagnostics::METHOD.to_string(),
			params: serde_json::to_value(&params)?,
		}))?;
		Ok(())
	}
}

// Runs a document through the pipeline, rendering its diagnostics in protocol form.
fn check(source: &str) -> Vec<lsp_types::Diagnostic> {
	let (expression, resolver, parsed) = parse(source);
	let (_, _, elaborated) = elaborate(&resolver, expression, None);
	parsed
		.into_iter()
		.chain(elaborated)
		.map(|diagnostic| lsp_types::Diagnostic {
			range: lsp_types::Range {
				start: lsp_types::Position {
					line: diagnostic.range.start.line,
					character: diagnostic.range.start.character,
				},
				end: lsp_types::Position { line: diagnostic.range.end.line, character: diagnostic.range.end.character },
			},
			severity: Some(DiagnosticSeverity::ERROR),
			message: diagnostic.message,
			..Default::default()
		})
		.collect()
}
