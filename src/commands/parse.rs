use crate::{
    libs::{
        duration::{normalize, round_for_storage},
        messages::Message,
        view::View,
    },
    msg_bail_anyhow,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Duration as typed, e.g. 2:30, 2:3, 2.5 or .75
    #[arg(allow_hyphen_values = true)]
    input: String,
}

pub fn cmd(args: ParseArgs) -> Result<()> {
    let duration = match normalize(&args.input) {
        Ok(duration) => duration,
        Err(e) => msg_bail_anyhow!(Message::from(&e)),
    };

    let decimal = duration.as_decimal_hours();
    View::parsed(&args.input, &duration.to_string(), decimal, round_for_storage(decimal))
}
