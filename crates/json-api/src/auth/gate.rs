//! Role gate hoop.

use salvo::prelude::*;

use caja_app::auth::{Role, authorize};

use crate::{auth::middleware::rejection, extensions::*};

/// Let only callers holding `0` through. Runs after the auth middleware.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequireRole(pub(crate) Role);

#[async_trait]
impl Handler for RequireRole {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let verdict = depot
            .identity_or_401()
            .and_then(|identity| authorize(identity, self.0).map_err(rejection));

        match verdict {
            Ok(()) => {
                ctrl.call_next(req, depot, res).await;
            }
            Err(error) => {
                res.render(error);
                ctrl.skip_rest();
            }
        }
    }
}
