use super::{Name, Symbol};
use serde::{Deserialize, Serialize};

/// Chain-specific accounts and token used when an operation leaves them unspecified
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Account hosting `newaccount`, `setcode`, `setabi` and the resource actions
    pub system_contract: Name,
    /// Code of the core token, e.g. `EOS`
    pub main_token: String,
    /// Account hosting the core token
    pub main_token_contract: Name,
    /// Decimal places of the core token
    pub main_token_precision: u8,
}

impl ChainConfig {
    /// The core token's symbol
    pub fn main_symbol(&self) -> Result<Symbol, super::AssetError> {
        Symbol::new(self.main_token_precision, &self.main_token)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            system_contract: Name::new(6138663577826885632),
            main_token: "EOS".to_owned(),
            main_token_contract: Name::new(6138663591592764928),
            main_token_precision: 4,
        }
    }
}
