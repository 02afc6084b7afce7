//! Label types for Prometheus metrics

use prometheus_client::encoding::EncodeLabelSet;

use crate::report::CustomerStatus;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct CustomerLabels {
    pub no: String,
    pub name: String,
    pub ip: String,
}

impl From<&CustomerStatus> for CustomerLabels {
    fn from(c: &CustomerStatus) -> Self {
        Self {
            no: c.sequence_number.to_string(),
            name: c.name.clone(),
            ip: c.ip.clone(),
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct StateLabels {
    pub state: String,
}

impl StateLabels {
    pub fn new(state: &str) -> Self {
        Self {
            state: state.to_string(),
        }
    }
}
