//! Zone effects: static modifiers active while the player is in a zone.
//!
//! Entering a zone registers its [`ZoneEffect`]; leaving unregisters it. The
//! provider itself holds no live state.

use idle_core::{Modifier, ModifierProvider, ProviderError, StatKey};
use serde::{Deserialize, Serialize};

use super::{ModifierSpec, scaled_modifiers};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneDefinition {
    pub id: String,
    #[serde(default)]
    pub modifiers: Vec<ModifierSpec>,
}

pub struct ZoneEffect {
    definition: ZoneDefinition,
}

impl ZoneEffect {
    pub fn new(definition: ZoneDefinition) -> Self {
        Self { definition }
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn definition(&self) -> &ZoneDefinition {
        &self.definition
    }
}

impl ModifierProvider for ZoneEffect {
    fn name(&self) -> &str {
        &self.definition.id
    }

    fn modifiers_for_stat(&self, stat: StatKey) -> Result<Vec<Modifier>, ProviderError> {
        Ok(scaled_modifiers(
            &self.definition.modifiers,
            stat,
            1.0,
            &self.definition.id,
        )?)
    }
}
