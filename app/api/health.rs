use crate::{error::Error, Context};
use hyper::{Body, Request, Response, StatusCode};
use vantage_util::error::Result;

pub(crate) async fn get(context: &Context, _request: Request<Body>) -> Result<Response<Body>> {
	// A poisoned session mutex means a handler panicked while holding it,
	// so the app can no longer serve commands.
	match context.state.lock() {
		Ok(_) => Ok(Response::builder()
			.status(StatusCode::OK)
			.body(Body::empty())?),
		Err(_) => Err(Error::ServiceUnavailable.into()),
	}
}
