/*!
This crate serves the dashboard over HTTP. All state lives in a single
[`Session`](vantage_core::Session) behind a mutex, every command route
mutates it and responds with the freshly derived dashboard, and the data
endpoint is only ever contacted by the load route and the optional startup
load.
*/

use self::{context::Context, error::Error};
use backtrace::Backtrace;
use futures::FutureExt;
use hyper::{
	service::{make_service_fn, service_fn},
	Body, Method, Request, Response, StatusCode,
};
use std::{
	borrow::Cow,
	cell::RefCell,
	convert::Infallible,
	panic::AssertUnwindSafe,
	sync::{Arc, Mutex},
};
use url::Url;
use vantage_core::Session;
use vantage_util::error::Result;

mod api;
mod error;
pub mod provider;

pub struct Options {
	pub host: std::net::IpAddr,
	pub port: u16,
	pub source_url: Option<Url>,
}

mod context {
	pub struct Context {
		pub options: super::Options,
		pub state: std::sync::Mutex<State>,
	}

	pub struct State {
		pub session: vantage_core::Session,
		pub loading: bool,
	}
}

async fn handle(request: Request<Body>, context: Arc<Context>) -> Response<Body> {
	let method = request.method().clone();
	let path = request.uri().path().to_owned();
	let path_components: Vec<_> = path.split('/').skip(1).collect();
	let result = match (&method, path_components.as_slice()) {
		(&Method::GET, &["health"]) => self::api::health::get(&context, request).await,
		(&Method::GET, &[""]) => self::api::dashboard::get(&context, request).await,
		(&Method::POST, &["load"]) => self::api::load::post(&context, request).await,
		(&Method::POST, &["filters"]) => self::api::filters::post(&context, request).await,
		(&Method::POST, &["table", "columns"]) => {
			self::api::table_columns::post(&context, request).await
		}
		(&Method::POST, &["charts"]) => self::api::charts::post(&context, request).await,
		_ => Err(Error::NotFound.into()),
	};
	let response = match result {
		Ok(response) => response,
		Err(error) => {
			if let Some(error) = error.downcast_ref::<Error>() {
				match error {
					Error::BadRequest => Response::builder()
						.status(StatusCode::BAD_REQUEST)
						.body(Body::from("bad request"))
						.unwrap(),
					Error::Conflict => Response::builder()
						.status(StatusCode::CONFLICT)
						.body(Body::from("conflict"))
						.unwrap(),
					Error::NotFound => Response::builder()
						.status(StatusCode::NOT_FOUND)
						.body(Body::from("not found"))
						.unwrap(),
					Error::ServiceUnavailable => Response::builder()
						.status(StatusCode::SERVICE_UNAVAILABLE)
						.body(Body::from("service unavailable"))
						.unwrap(),
				}
			} else {
				eprintln!("{}", error);
				let body: Cow<str> = if cfg!(debug_assertions) {
					format!("{}", error).into()
				} else {
					"internal server error".into()
				};
				Response::builder()
					.status(StatusCode::INTERNAL_SERVER_ERROR)
					.body(Body::from(body))
					.unwrap()
			}
		}
	};
	eprintln!("{} {} {}", method, path, response.status());
	response
}

pub fn run(options: Options) -> Result<()> {
	tokio::runtime::Builder::new()
		.threaded_scheduler()
		.enable_all()
		.build()
		.unwrap()
		.block_on(run_impl(options))
}

async fn run_impl(options: Options) -> Result<()> {
	// Seed the session from the configured data endpoint, if there is one.
	// A failed startup load is reported but not fatal, the app starts empty
	// and the load route can be used later.
	let mut session = Session::new();
	if let Some(source_url) = &options.source_url {
		match provider::fetch_records(source_url).await {
			Ok(records) => {
				session.load(records);
			}
			Err(error) => eprintln!("initial load from {} failed: {}", source_url, error),
		}
	}
	// Run the server.
	tokio::task_local! {
		static PANIC_MESSAGE_AND_BACKTRACE: RefCell<Option<(String, Backtrace)>>;
	}
	let hook = std::panic::take_hook();
	std::panic::set_hook(Box::new(|panic_info| {
		let value = (panic_info.to_string(), Backtrace::new());
		PANIC_MESSAGE_AND_BACKTRACE.with(|panic_message_and_backtrace| {
			panic_message_and_backtrace.borrow_mut().replace(value);
		})
	}));
	let context = Arc::new(Context {
		options,
		state: Mutex::new(context::State {
			session,
			loading: false,
		}),
	});
	let service = make_service_fn(|_| {
		let context = context.clone();
		async move {
			Ok::<_, Infallible>(service_fn(move |request| {
				let method = request.method().to_owned();
				let path = request.uri().path().to_owned();
				let context = context.clone();
				PANIC_MESSAGE_AND_BACKTRACE.scope(RefCell::new(None), async move {
					let response = AssertUnwindSafe(handle(request, context))
						.catch_unwind()
						.await
						.unwrap_or_else(|_| {
							let backtrace =
								PANIC_MESSAGE_AND_BACKTRACE.with(|panic_message_and_backtrace| {
									let panic_message_and_backtrace =
										panic_message_and_backtrace.borrow();
									let (message, backtrace) =
										panic_message_and_backtrace.as_ref().unwrap();
									format!("{}\n{:?}", message, backtrace)
								});
							eprintln!("{} {} 500", method, path);
							Response::builder()
								.status(StatusCode::INTERNAL_SERVER_ERROR)
								.body(Body::from(backtrace))
								.unwrap()
						});
					Ok::<_, Infallible>(response)
				})
			}))
		}
	});
	let addr = std::net::SocketAddr::new(context.options.host, context.options.port);
	let listener = std::net::TcpListener::bind(&addr)?;
	eprintln!("🚀 serving on port {}", context.options.port);
	hyper::Server::from_tcp(listener)?.serve(service).await?;
	std::panic::set_hook(hook);
	Ok(())
}

#[cfg(test)]
fn test_context() -> Arc<Context> {
	Arc::new(Context {
		options: Options {
			host: "127.0.0.1".parse().unwrap(),
			port: 0,
			source_url: None,
		},
		state: Mutex::new(context::State {
			session: Session::new(),
			loading: false,
		}),
	})
}

#[cfg(test)]
fn test_handle(request: Request<Body>, context: Arc<Context>) -> Response<Body> {
	tokio::runtime::Builder::new()
		.basic_scheduler()
		.enable_all()
		.build()
		.unwrap()
		.block_on(handle(request, context))
}

#[test]
fn test_handle_maps_errors_to_statuses() {
	let context = test_context();
	let request = Request::builder()
		.method("POST")
		.uri("/filters")
		.body(Body::from("{not json"))
		.unwrap();
	let response = test_handle(request, context.clone());
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	let request = Request::builder()
		.method("GET")
		.uri("/bogus")
		.body(Body::empty())
		.unwrap();
	let response = test_handle(request, context);
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_load_is_refused_while_one_is_in_flight() {
	let context = test_context();
	context.state.lock().unwrap().loading = true;
	let request = Request::builder()
		.method("POST")
		.uri("/load")
		.body(Body::from(r#"{"url":"http://localhost/records"}"#))
		.unwrap();
	let response = test_handle(request, context.clone());
	assert_eq!(response.status(), StatusCode::CONFLICT);
	// The refused load must not clear the flag the running one owns.
	assert!(context.state.lock().unwrap().loading);
}

#[test]
fn test_health_reports_a_poisoned_session() {
	let context = test_context();
	let poisoner = context.clone();
	let _ = std::thread::spawn(move || {
		let _state = poisoner.state.lock().unwrap();
		panic!("poison the session mutex");
	})
	.join();
	let request = Request::builder()
		.method("GET")
		.uri("/health")
		.body(Body::empty())
		.unwrap();
	let response = test_handle(request, context);
	assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
