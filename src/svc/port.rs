//! Port-variant construction from the `svc_type` discriminator.
//!
//! # Responsibilities
//! - Decide whether the body carries a port sub-record at all
//! - Dispatch on the recognized port kinds
//! - Validate and build the port from its companion fields
//!
//! # Design Decisions
//! - Kinds are a closed enum; each kind owns its required-field list
//! - Fail fast: the first missing or malformed field aborts the call
//! - The discriminator and companion fields are consumed here and never
//!   reach the generic form mapper

use std::fmt;
use std::str::FromStr;

use crate::svc::error::ApiError;
use crate::svc::model::ServicePort;
use crate::svc::params::ParamGroup;

/// Discriminator field selecting the port kind.
pub const SVC_TYPE: &str = "svc_type";
pub const SVC_PORT: &str = "svc_port";
pub const SVC_TARGET_PORT: &str = "svc_target_port";
pub const SVC_PORT_PROTOCOL: &str = "svc_port_protocol";

/// Every body field owned by the port builder.
pub const PORT_FIELDS: &[&str] = &[SVC_TYPE, SVC_PORT, SVC_TARGET_PORT, SVC_PORT_PROTOCOL];

/// Recognized port kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    /// Cluster-internal virtual IP.
    ClusterIp,
}

impl PortKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortKind::ClusterIp => "ClusterIP",
        }
    }

    /// Body fields that must be present for this kind.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            PortKind::ClusterIp => &[SVC_PORT, SVC_TARGET_PORT, SVC_PORT_PROTOCOL],
        }
    }

    /// Build the port for this kind from the body group.
    ///
    /// Every required field is checked for presence before any is parsed.
    pub fn build(&self, body: &ParamGroup) -> Result<ServicePort, ApiError> {
        for field in self.required_fields() {
            body.extract(field)?;
        }
        match self {
            PortKind::ClusterIp => Ok(ServicePort {
                svc_port: body.extract_int::<i32>(SVC_PORT)?,
                svc_target_port: body.extract_int::<i32>(SVC_TARGET_PORT)?,
                svc_port_protocol: body.extract(SVC_PORT_PROTOCOL)?.to_string(),
                svc_node_port: None,
            }),
        }
    }
}

impl FromStr for PortKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ClusterIP" => Ok(PortKind::ClusterIp),
            other => Err(ApiError::UnsupportedType(other.to_string())),
        }
    }
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the port described by the body, if any.
///
/// Returns `Ok(None)` when no discriminator was supplied.
pub fn build_port(body: &ParamGroup) -> Result<Option<(PortKind, ServicePort)>, ApiError> {
    let Some(raw) = body.first(SVC_TYPE) else {
        return Ok(None);
    };
    let kind: PortKind = raw.parse()?;
    let port = kind.build(body)?;
    Ok(Some((kind, port)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(pairs: &[(&str, &str)]) -> ParamGroup {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_absent_discriminator_builds_nothing() {
        let group = body(&[("svc_port", "80"), ("svc_name", "a")]);
        assert!(build_port(&group).unwrap().is_none());
    }

    #[test]
    fn test_cluster_ip_port() {
        let group = body(&[
            ("svc_type", "ClusterIP"),
            ("svc_port", "80"),
            ("svc_target_port", "8080"),
            ("svc_port_protocol", "TCP"),
        ]);
        let (kind, port) = build_port(&group).unwrap().unwrap();
        assert_eq!(kind, PortKind::ClusterIp);
        assert_eq!(port.svc_port, 80);
        assert_eq!(port.svc_target_port, 8080);
        assert_eq!(port.svc_port_protocol, "TCP");
        assert_eq!(port.svc_node_port, None);
    }

    #[test]
    fn test_unknown_kind_rejected_before_fields() {
        // Companion fields are valid; the kind alone decides.
        let group = body(&[
            ("svc_type", "NodePort"),
            ("svc_port", "80"),
            ("svc_target_port", "8080"),
            ("svc_port_protocol", "TCP"),
        ]);
        let err = build_port(&group).unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedType(ref k) if k == "NodePort"));

        let err = build_port(&body(&[("svc_type", "clusterip")])).unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedType(_)));
    }

    #[test]
    fn test_each_required_field() {
        let full = [
            ("svc_type", "ClusterIP"),
            ("svc_port", "80"),
            ("svc_target_port", "8080"),
            ("svc_port_protocol", "TCP"),
        ];
        for missing in PortKind::ClusterIp.required_fields() {
            let pairs: Vec<_> = full.iter().copied().filter(|(k, _)| k != missing).collect();
            let err = build_port(&body(&pairs)).unwrap_err();
            assert!(
                matches!(err, ApiError::MissingField { ref field } if field == *missing),
                "expected missing {missing}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_presence_checked_before_parsing() {
        // A malformed port alongside a missing protocol reports the missing field.
        let group = body(&[("svc_type", "ClusterIP"), ("svc_port", "eighty"), ("svc_target_port", "8080")]);
        let err = build_port(&group).unwrap_err();
        assert!(matches!(err, ApiError::MissingField { ref field } if field == "svc_port_protocol"));
    }

    #[test]
    fn test_malformed_port_numbers() {
        let group = body(&[
            ("svc_type", "ClusterIP"),
            ("svc_port", "eighty"),
            ("svc_target_port", "8080"),
            ("svc_port_protocol", "TCP"),
        ]);
        let err = build_port(&group).unwrap_err();
        assert!(matches!(err, ApiError::InvalidFormat { ref field, .. } if field == "svc_port"));

        let group = body(&[
            ("svc_type", "ClusterIP"),
            ("svc_port", "80"),
            ("svc_target_port", "3000000000"),
            ("svc_port_protocol", "TCP"),
        ]);
        let err = build_port(&group).unwrap_err();
        assert!(matches!(err, ApiError::InvalidFormat { ref field, .. } if field == "svc_target_port"));
    }
}
