//! Manifest generation from configuration values
//!
//! Each supported type is a fixed-shape template. Configuration keys fill in
//! the template, with a named default for every key that is absent.

use std::fmt;
use std::str::FromStr;

use serde_json::Value as JsonValue;
use serde_yaml::{Mapping, Value};

use crate::error::{CoreError, Result};
use crate::values::Values;

/// Maximum edit distance for a did-you-mean suggestion
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Resource types the generator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Deployment,
    Service,
    Ingress,
    ConfigMap,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Deployment,
        ResourceType::Service,
        ResourceType::Ingress,
        ResourceType::ConfigMap,
    ];

    /// Lowercase tag accepted on input
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deployment => "deployment",
            Self::Service => "service",
            Self::Ingress => "ingress",
            Self::ConfigMap => "configmap",
        }
    }

    /// Kubernetes kind of the generated resource
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::Service => "Service",
            Self::Ingress => "Ingress",
            Self::ConfigMap => "ConfigMap",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownResourceType {
                resource_type: s.to_string(),
                suggestion: suggest_type(s),
            })
    }
}

fn suggest_type(input: &str) -> Option<String> {
    let lowered = input.to_lowercase();
    ResourceType::ALL
        .into_iter()
        .map(|t| (t, strsim::levenshtein(&lowered, t.as_str())))
        .filter(|(_, distance)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(t, _)| t.as_str().to_string())
}

/// Build the resource tree for `resource_type` from `config`
pub fn generate(resource_type: ResourceType, config: &Values) -> Result<Value> {
    tracing::debug!(resource_type = %resource_type, "generating manifest");

    match resource_type {
        ResourceType::Deployment => deployment(config),
        ResourceType::Service => service(config),
        ResourceType::Ingress => ingress(config),
        ResourceType::ConfigMap => configmap(config),
    }
}

/// Generate a manifest and serialize it to YAML
pub fn generate_manifest(resource_type: &str, config: &Values) -> Result<String> {
    let resource_type = resource_type.parse::<ResourceType>()?;
    let tree = generate(resource_type, config)?;

    serde_yaml::to_string(&tree).map_err(|e| CoreError::Generation {
        message: e.to_string(),
    })
}

fn deployment(config: &Values) -> Result<Value> {
    let name = param(config, "name", "my-deployment")?;
    let image = param(config, "image", "nginx:latest")?;
    let replicas = param(config, "replicas", 3)?;
    let port = match lookup(config, "containerPort") {
        Some(port) => to_yaml(port)?,
        None => param(config, "port", 80)?,
    };

    let labels = || map([("app", name.clone())]);

    Ok(map([
        ("apiVersion", "apps/v1".into()),
        ("kind", "Deployment".into()),
        (
            "metadata",
            map([("name", name.clone()), ("labels", labels())]),
        ),
        (
            "spec",
            map([
                ("replicas", replicas),
                ("selector", map([("matchLabels", labels())])),
                (
                    "template",
                    map([
                        ("metadata", map([("labels", labels())])),
                        (
                            "spec",
                            map([(
                                "containers",
                                seq(map([
                                    ("name", name.clone()),
                                    ("image", image),
                                    ("ports", seq(map([("containerPort", port)]))),
                                ])),
                            )]),
                        ),
                    ]),
                ),
            ]),
        ),
    ]))
}

fn service(config: &Values) -> Result<Value> {
    let name = param(config, "name", "my-service")?;
    let app = match lookup(config, "app") {
        Some(app) => to_yaml(app)?,
        None => name.clone(),
    };
    let port = param(config, "port", 80)?;
    let target_port = match lookup(config, "targetPort") {
        Some(target) => to_yaml(target)?,
        None => port.clone(),
    };
    let service_type = param(config, "type", "ClusterIP")?;

    Ok(map([
        ("apiVersion", "v1".into()),
        ("kind", "Service".into()),
        ("metadata", map([("name", name)])),
        (
            "spec",
            map([
                ("selector", map([("app", app)])),
                ("type", service_type),
                (
                    "ports",
                    seq(map([
                        ("port", port),
                        ("targetPort", target_port),
                        ("protocol", "TCP".into()),
                    ])),
                ),
            ]),
        ),
    ]))
}

fn ingress(config: &Values) -> Result<Value> {
    let name = param(config, "name", "my-ingress")?;
    let host = param(config, "host", "example.com")?;
    let service_name = param(config, "serviceName", "my-service")?;
    let service_port = param(config, "servicePort", 80)?;
    let path = param(config, "path", "/")?;
    let path_type = param(config, "pathType", "Prefix")?;

    let backend = map([(
        "service",
        map([
            ("name", service_name),
            ("port", map([("number", service_port)])),
        ]),
    )]);

    Ok(map([
        ("apiVersion", "networking.k8s.io/v1".into()),
        ("kind", "Ingress".into()),
        ("metadata", map([("name", name)])),
        (
            "spec",
            map([(
                "rules",
                seq(map([
                    ("host", host),
                    (
                        "http",
                        map([(
                            "paths",
                            seq(map([
                                ("path", path),
                                ("pathType", path_type),
                                ("backend", backend),
                            ])),
                        )]),
                    ),
                ])),
            )]),
        ),
    ]))
}

fn configmap(config: &Values) -> Result<Value> {
    let name = param(config, "name", "my-config")?;
    let data = match lookup(config, "data") {
        Some(data) => to_yaml(data)?,
        None => map([("key", "value".into())]),
    };

    Ok(map([
        ("apiVersion", "v1".into()),
        ("kind", "ConfigMap".into()),
        ("metadata", map([("name", name)])),
        ("data", data),
    ]))
}

/// Top-level configuration key; `null` counts as absent
fn lookup<'a>(config: &'a Values, key: &str) -> Option<&'a JsonValue> {
    config.inner().get(key).filter(|v| !v.is_null())
}

fn param(config: &Values, key: &str, default: impl Into<Value>) -> Result<Value> {
    match lookup(config, key) {
        Some(value) => to_yaml(value),
        None => Ok(default.into()),
    }
}

fn to_yaml(value: &JsonValue) -> Result<Value> {
    serde_yaml::to_value(value).map_err(|e| CoreError::Generation {
        message: e.to_string(),
    })
}

fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
    let mut mapping = Mapping::with_capacity(N);
    for (key, value) in entries {
        mapping.insert(Value::from(key), value);
    }
    Value::Mapping(mapping)
}

fn seq(item: Value) -> Value {
    Value::Sequence(vec![item])
}
