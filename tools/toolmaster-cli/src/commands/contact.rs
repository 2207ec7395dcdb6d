//! Contact form command.

use anyhow::{anyhow, bail, Result};
use toolmaster_storefront::contact::{FormValues, SENDING_MESSAGE};
use toolmaster_storefront::{ContactForm, FormOutcome, HttpTransport};

use super::ContactArgs;
use crate::context::Context;

/// Run the contact command.
pub async fn run(args: ContactArgs, ctx: &Context) -> Result<()> {
    let endpoint = args
        .endpoint
        .or_else(|| ctx.config.shop.contact_endpoint.clone())
        .ok_or_else(|| anyhow!("No contact endpoint: pass --endpoint or set shop.contact_endpoint"))?;

    let values: FormValues = [
        ("name", args.name),
        ("email", args.email),
        ("phone", args.phone),
        ("message", args.message),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let transport = HttpTransport::new(endpoint);
    ctx.output.debug(&format!("Posting to {}", transport.action()));

    let spinner = ctx.output.spinner(SENDING_MESSAGE);
    let outcome = ContactForm::standard().submit(&transport, &values).await;
    spinner.finish_and_clear();

    match &outcome {
        FormOutcome::Sent => {
            ctx.output.success(outcome.message());
            Ok(())
        }
        FormOutcome::Invalid(errors) => {
            for (field, error) in errors {
                ctx.output.list_item(&format!("{}: {}", field, error));
            }
            bail!("{}", outcome.message())
        }
        FormOutcome::Rejected(_) | FormOutcome::NetworkError => bail!("{}", outcome.message()),
    }
}
