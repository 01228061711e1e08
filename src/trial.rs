use serde_json::Value;

/// One raw study record as returned by the registry.
///
/// The upstream document is a deeply nested JSON object whose modules come and
/// go between studies. Every accessor here is total: a missing path resolves
/// to an empty default and is never an error.
#[derive(Debug, Clone)]
pub struct RawTrial(Value);

impl RawTrial {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Walk a key path from the document root, yielding `Value::Null` when any
    /// step is absent.
    pub fn value_at(&self, path: &[&str]) -> &Value {
        let mut current = &self.0;
        for key in path {
            match current.get(key) {
                Some(next) => current = next,
                None => return &Value::Null,
            }
        }
        current
    }

    /// String at a path, or `""` when absent or non-string.
    pub fn str_at(&self, path: &[&str]) -> &str {
        self.value_at(path).as_str().unwrap_or("")
    }

    /// Array at a path, or an empty slice when absent or non-array.
    pub fn array_at(&self, path: &[&str]) -> &[Value] {
        self.value_at(path).as_array().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Unsigned integer at a path, or 0 when absent or non-numeric.
    pub fn u64_at(&self, path: &[&str]) -> u64 {
        self.value_at(path).as_u64().unwrap_or(0)
    }

    /// Boolean at a path, or `false` when absent.
    pub fn bool_at(&self, path: &[&str]) -> bool {
        self.value_at(path).as_bool().unwrap_or(false)
    }

    /// String elements of an array at a path, skipping non-string entries.
    pub fn strings_at(&self, path: &[&str]) -> Vec<&str> {
        self.array_at(path)
            .iter()
            .filter_map(Value::as_str)
            .collect()
    }

    /// The sponsors module. The registry has used both spellings over time, so
    /// both are accepted.
    pub fn sponsors_module(&self) -> &Value {
        let preferred = self.value_at(&["protocolSection", "sponsorCollaboratorsModule"]);
        if preferred.is_null() {
            self.value_at(&["protocolSection", "sponsorsCollaboratorsModule"])
        } else {
            preferred
        }
    }

    pub fn nct_id(&self) -> &str {
        self.str_at(&["protocolSection", "identificationModule", "nctId"])
    }

    pub fn title(&self) -> &str {
        self.str_at(&["protocolSection", "identificationModule", "briefTitle"])
    }

    pub fn status(&self) -> &str {
        self.str_at(&["protocolSection", "statusModule", "overallStatus"])
    }

    pub fn lead_sponsor_name(&self) -> &str {
        self.sponsors_module()
            .get("leadSponsor")
            .and_then(|s| s.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn collaborator_names(&self) -> Vec<&str> {
        self.sponsors_module()
            .get("collaborators")
            .and_then(Value::as_array)
            .map(|collabs| {
                collabs
                    .iter()
                    .filter_map(|c| c.get("name").and_then(Value::as_str))
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
