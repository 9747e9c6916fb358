//! Auth command: the stored session token.

use anyhow::{bail, Result};
use tailor_storefront::AuthStatus;

use super::{AuthArgs, AuthCommand};
use crate::context::Context;

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AuthCommand::Login { token } => login(&token, ctx),
        AuthCommand::Logout => logout(ctx),
        AuthCommand::Status => status(ctx),
    }
}

fn login(token: &str, ctx: &Context) -> Result<()> {
    let status = AuthStatus::from_token(Some(token.to_string()));
    let Some(token) = status.token() else {
        bail!("Token must not be blank");
    };
    ctx.save_session(Some(token))?;
    ctx.logger.info("session stored");
    ctx.output.success("Logged in; the cart now lives on the server");
    Ok(())
}

fn logout(ctx: &Context) -> Result<()> {
    ctx.save_session(None)?;
    ctx.logger.info("session cleared");
    ctx.output.success("Logged out; the cart is local again");
    Ok(())
}

fn status(ctx: &Context) -> Result<()> {
    let authenticated = ctx.auth_status()?.is_authenticated();
    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "authenticated": authenticated }));
    } else if authenticated {
        ctx.output.info("Logged in");
    } else {
        ctx.output.info("Not logged in");
    }
    Ok(())
}
