use std::env;

use thoughtverse::{Config, ContentPlatform, Deployment, HttpTransport, Session};
use tracing::debug;

use crate::{cli::NetworkOptions, error::Result, ui};

/// Effective configuration for one invocation.
pub struct Context {
    pub config: Config,
}

/// A connected wallet bound to the configured deployment.
pub struct Connection {
    pub session: Session,
    pub deployment: Deployment,
}

impl Context {
    /// Layers the config file under `--rpc-url`/`--contract` (and their
    /// environment variables).
    pub fn load(options: &NetworkOptions) -> Result<Self> {
        let cwd = env::current_dir()?;
        let mut config = Config::discover(options.config.as_deref(), &cwd)?;

        if let Some(url) = &options.rpc_url {
            config.rpc_url.clone_from(url);
        }
        if let Some(contract) = &options.contract {
            config.contract_address = Some(contract.clone());
        }

        debug!(rpc_url = %config.rpc_url, contract = ?config.contract_address, "configuration");
        Ok(Self { config })
    }

    pub fn connect(&self) -> Result<Connection> {
        let deployment = Deployment::from_config(&self.config)?;

        let transport = HttpTransport::new(self.config.rpc_url.as_str())?;
        ui::status(format!("Connecting to {}", transport.url()));
        let session = Session::connect(transport)?;

        Ok(Connection {
            session,
            deployment,
        })
    }
}

impl Connection {
    pub fn platform(&self) -> ContentPlatform<'_> {
        ContentPlatform::new(&self.session, &self.deployment)
    }
}
