//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use caja_app::auth::AuthError;

use crate::{errors::ApiError, extensions::*, state::State};

/// Verify the bearer token and expose the caller's identity to later handlers.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match state.tokens.verify_bearer(header) {
        Ok(identity) => {
            depot.insert_identity(identity);

            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            res.render(rejection(error));
            ctrl.skip_rest();
        }
    }
}

/// Map a credential or role failure to its response.
pub(crate) fn rejection(error: AuthError) -> ApiError {
    match error {
        AuthError::MissingToken => {
            ApiError::unauthorized("Acceso denegado. No se proporcionó token.")
        }
        AuthError::InvalidToken => ApiError::unauthorized("Token inválido."),
        AuthError::MissingRole => ApiError::forbidden("Rol no encontrado en token."),
        AuthError::Forbidden { required, .. } => {
            ApiError::forbidden(format!("Permiso denegado. Requiere rol: {required}"))
        }
    }
}
