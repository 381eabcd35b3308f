mod send;
mod validate;

use anyhow::Result;

use crate::cli::Commands;

pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Send {
            input,
            attach,
            country_code,
            output,
            browser_path,
            user_data_dir,
            headless,
            waits,
        } => {
            send::execute(send::SendOptions {
                input,
                attach,
                country_code,
                output,
                browser_path,
                user_data_dir,
                headless,
                timeouts: waits.to_timeouts(),
            })
            .await
        }
        Commands::Validate { input } => validate::execute(&input),
    }
}
