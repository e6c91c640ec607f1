//! Deprecated API versions
//!
//! Each entry names a `(kind, apiVersion)` pair that was superseded, the version
//! to migrate to, and the Kubernetes release that removed it.

/// A superseded API version for a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeprecatedApi {
    pub kind: &'static str,
    pub api_version: &'static str,
    pub replacement: &'static str,
    pub removed_in: &'static str,
}

const fn deprecated(
    kind: &'static str,
    api_version: &'static str,
    replacement: &'static str,
    removed_in: &'static str,
) -> DeprecatedApi {
    DeprecatedApi {
        kind,
        api_version,
        replacement,
        removed_in,
    }
}

pub static DEPRECATED_APIS: &[DeprecatedApi] = &[
    deprecated("Deployment", "extensions/v1beta1", "apps/v1", "1.16"),
    deprecated("Deployment", "apps/v1beta1", "apps/v1", "1.16"),
    deprecated("Deployment", "apps/v1beta2", "apps/v1", "1.16"),
    deprecated("StatefulSet", "apps/v1beta1", "apps/v1", "1.16"),
    deprecated("StatefulSet", "apps/v1beta2", "apps/v1", "1.16"),
    deprecated("DaemonSet", "extensions/v1beta1", "apps/v1", "1.16"),
    deprecated("DaemonSet", "apps/v1beta2", "apps/v1", "1.16"),
    deprecated("ReplicaSet", "extensions/v1beta1", "apps/v1", "1.16"),
    deprecated("Ingress", "extensions/v1beta1", "networking.k8s.io/v1", "1.22"),
    deprecated("Ingress", "networking.k8s.io/v1beta1", "networking.k8s.io/v1", "1.22"),
];

/// Find the deprecation entry for a kind at a given API version
pub fn find_deprecation(kind: &str, api_version: &str) -> Option<&'static DeprecatedApi> {
    DEPRECATED_APIS
        .iter()
        .find(|d| d.kind == kind && d.api_version == api_version)
}
