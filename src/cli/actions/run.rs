use super::Action;
use crate::tls::{CipherTable, host_provider, probe};

/// Execute the action's business logic by delegating to the appropriate module
pub async fn execute(action: Action) -> anyhow::Result<()> {
    match action {
        Action::Show(request) => {
            let config = request.build()?;
            println!("{}", serde_json::to_string_pretty(&config.summary())?);
        }
        Action::Probe(request) => {
            let config = request.build()?;
            let metadata = probe(&config, &request.destination).await?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Action::Ciphers => {
            let table = CipherTable::from_provider(&host_provider());
            for name in table.names() {
                if let Some(id) = table.resolve(name) {
                    println!("{name:<48} 0x{id:04x}");
                }
            }
        }
    }

    Ok(())
}
