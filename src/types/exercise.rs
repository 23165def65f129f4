use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub time: u32, // in seconds
}

impl Exercise {
    pub fn new(name: &str, time: u32) -> Self {
        Exercise {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            time,
        }
    }

    /// Copy of this exercise under a fresh id.
    pub fn duplicate(&self) -> Self {
        Exercise {
            id: Uuid::new_v4().to_string(),
            name: self.name.clone(),
            time: self.time,
        }
    }
}
