//! Typed records exchanged with the backend.

use serde::{Deserialize, Serialize};

use crate::svc::error::ApiError;
use crate::svc::form::{Coercion, FieldSpec, FieldTable, FormTarget};
use crate::svc::params::ParamGroup;

/// Query field carrying a service identifier.
pub const SVC_ID: &str = "svc_id";

/// Identifier of a backend service record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId {
    pub id: i64,
}

impl ServiceId {
    /// Parse the identifier from `svc_id` in `group`.
    pub fn from_group(group: &ParamGroup) -> Result<Self, ApiError> {
        Ok(Self {
            id: group.extract_int::<i64>(SVC_ID)?,
        })
    }
}

impl From<i64> for ServiceId {
    fn from(id: i64) -> Self {
        Self { id }
    }
}

/// One exposed port of a service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServicePort {
    pub svc_port: i32,
    pub svc_target_port: i32,
    pub svc_port_protocol: String,
    /// Assigned by the backend for node-level kinds; never set here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svc_node_port: Option<i32>,
}

/// The service record assembled for create calls and returned by lookups.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceDescriptor {
    pub id: i64,
    pub svc_name: String,
    pub svc_namespace: String,
    pub svc_pod_name: String,
    pub svc_type: String,
    pub svc_team_id: i64,
    pub svc_port: Vec<ServicePort>,
}

/// Every descriptor known to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceList {
    pub svc_info: Vec<ServiceDescriptor>,
}

/// Acknowledgement returned by mutating backend calls.
///
/// Fields other than `msg` are kept verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceReply {
    #[serde(default)]
    pub msg: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ServiceReply {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            extra: serde_json::Map::new(),
        }
    }
}

fn parse_i64(raw: &str) -> Result<i64, String> {
    raw.parse::<i64>().map_err(|e| e.to_string())
}

fn set_id(d: &mut ServiceDescriptor, raw: &str) -> Result<(), String> {
    d.id = parse_i64(raw)?;
    Ok(())
}

fn set_name(d: &mut ServiceDescriptor, raw: &str) -> Result<(), String> {
    d.svc_name = raw.to_string();
    Ok(())
}

fn set_namespace(d: &mut ServiceDescriptor, raw: &str) -> Result<(), String> {
    d.svc_namespace = raw.to_string();
    Ok(())
}

fn set_pod_name(d: &mut ServiceDescriptor, raw: &str) -> Result<(), String> {
    d.svc_pod_name = raw.to_string();
    Ok(())
}

fn set_team_id(d: &mut ServiceDescriptor, raw: &str) -> Result<(), String> {
    d.svc_team_id = parse_i64(raw)?;
    Ok(())
}

static DESCRIPTOR_SPECS: &[FieldSpec<ServiceDescriptor>] = &[
    FieldSpec { name: "id", aliases: &["svc_id"], coercion: Coercion::Lenient, set: set_id },
    FieldSpec { name: "svc_name", aliases: &["name"], coercion: Coercion::Lenient, set: set_name },
    FieldSpec { name: "svc_namespace", aliases: &["namespace"], coercion: Coercion::Lenient, set: set_namespace },
    FieldSpec { name: "svc_pod_name", aliases: &["pod_name"], coercion: Coercion::Lenient, set: set_pod_name },
    FieldSpec { name: "svc_team_id", aliases: &["team_id"], coercion: Coercion::Strict, set: set_team_id },
];

static DESCRIPTOR_FIELDS: FieldTable<ServiceDescriptor> = FieldTable::new(DESCRIPTOR_SPECS);

impl FormTarget for ServiceDescriptor {
    fn field_table() -> &'static FieldTable<Self> {
        &DESCRIPTOR_FIELDS
    }
}
