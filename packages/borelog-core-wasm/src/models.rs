// This is the models module containing shared response structures
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct DatasetStats {
    pub location_count: usize,
    pub reading_location_count: usize,
    pub layer_location_count: usize,
}
