// file: src/ttp/attack.rs
// description: MITRE ATT&CK STIX bundle client and group/technique index
// reference: https://github.com/mitre/cti enterprise-attack bundle

use crate::error::{IntelError, Result};
use crate::ttp::{TechniqueLookup, TechniqueMap};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct StixBundle {
    objects: Vec<StixObject>,
}

#[derive(Debug, Deserialize)]
struct StixObject {
    #[serde(rename = "type")]
    object_type: String,
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    external_references: Vec<ExternalReference>,
    #[serde(default)]
    relationship_type: Option<String>,
    #[serde(default)]
    source_ref: Option<String>,
    #[serde(default)]
    target_ref: Option<String>,
    #[serde(default)]
    revoked: bool,
    #[serde(default, rename = "x_mitre_deprecated")]
    deprecated: bool,
    #[serde(default, rename = "x_mitre_is_subtechnique")]
    is_subtechnique: bool,
}

#[derive(Debug, Deserialize)]
struct ExternalReference {
    #[serde(default)]
    source_name: Option<String>,
    #[serde(default)]
    external_id: Option<String>,
}

impl StixObject {
    fn is_active(&self) -> bool {
        !self.revoked && !self.deprecated
    }

    fn attack_id(&self) -> Option<&str> {
        self.external_references
            .iter()
            .find(|r| r.source_name.as_deref() == Some("mitre-attack"))
            .and_then(|r| r.external_id.as_deref())
    }
}

/// In-memory index over the STIX bundle: lowercased group name or
/// alias -> techniques the group uses.
#[derive(Debug, Default)]
pub struct GroupIndex {
    group_names: HashMap<String, String>,
    group_uses: HashMap<String, Vec<String>>,
    techniques: HashMap<String, (String, String)>,
}

impl GroupIndex {
    fn from_bundle(bundle: StixBundle) -> Self {
        let mut index = Self::default();

        for object in &bundle.objects {
            match object.object_type.as_str() {
                "intrusion-set" if object.is_active() => {
                    if let Some(name) = &object.name {
                        index
                            .group_names
                            .insert(name.to_lowercase(), object.id.clone());
                    }
                    for alias in &object.aliases {
                        index
                            .group_names
                            .entry(alias.to_lowercase())
                            .or_insert_with(|| object.id.clone());
                    }
                }
                // Sub-techniques are excluded from lookups
                "attack-pattern" if object.is_active() && !object.is_subtechnique => {
                    if let (Some(attack_id), Some(name)) = (object.attack_id(), &object.name) {
                        index.techniques.insert(
                            object.id.clone(),
                            (attack_id.to_string(), name.clone()),
                        );
                    }
                }
                "relationship" => {
                    if object.relationship_type.as_deref() == Some("uses")
                        && let (Some(source), Some(target)) =
                            (&object.source_ref, &object.target_ref)
                        && source.starts_with("intrusion-set--")
                        && target.starts_with("attack-pattern--")
                    {
                        index
                            .group_uses
                            .entry(source.clone())
                            .or_default()
                            .push(target.clone());
                    }
                }
                _ => {}
            }
        }

        index
    }

    pub fn techniques_for(&self, actor: &str) -> TechniqueMap {
        let mut techniques = TechniqueMap::new();
        let Some(group_id) = self.group_names.get(&actor.to_lowercase()) else {
            return techniques;
        };

        for target in self.group_uses.get(group_id).into_iter().flatten() {
            if let Some((attack_id, name)) = self.techniques.get(target) {
                techniques.insert(attack_id.clone(), name.clone());
            }
        }
        techniques
    }

    pub fn group_count(&self) -> usize {
        self.group_names.len()
    }
}

enum IndexState {
    Unloaded,
    Loaded(GroupIndex),
    Failed,
}

/// Technique lookup backed by the enterprise ATT&CK STIX bundle. The
/// bundle is fetched and indexed once, on the first lookup; a failed
/// fetch is remembered so later lookups fail fast without re-fetching.
pub struct AttackStixClient {
    client: reqwest::Client,
    url: String,
    index: IndexState,
}

impl AttackStixClient {
    pub fn new(url: String, user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url,
            index: IndexState::Unloaded,
        })
    }

    async fn fetch_bundle(&self) -> Result<GroupIndex> {
        info!("Fetching ATT&CK STIX bundle from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(IntelError::FeedParse(format!(
                "ATT&CK bundle request failed with status {}",
                response.status()
            )));
        }

        let bundle: StixBundle = response.json().await?;
        let index = GroupIndex::from_bundle(bundle);
        info!("Indexed {} ATT&CK group names and aliases", index.group_count());
        Ok(index)
    }

    async fn index(&mut self) -> Result<&GroupIndex> {
        if matches!(self.index, IndexState::Unloaded) {
            match self.fetch_bundle().await {
                Ok(index) => self.index = IndexState::Loaded(index),
                Err(e) => {
                    warn!("ATT&CK bundle unavailable: {}", e);
                    self.index = IndexState::Failed;
                }
            }
        }

        match &self.index {
            IndexState::Loaded(index) => Ok(index),
            _ => Err(IntelError::FeedParse(
                "ATT&CK bundle unavailable".to_string(),
            )),
        }
    }
}

#[async_trait]
impl TechniqueLookup for AttackStixClient {
    fn name(&self) -> &'static str {
        "mitre-attack-stix"
    }

    async fn techniques_for_group(&mut self, actor: &str) -> Result<TechniqueMap> {
        let actor = actor.to_string();
        let index = self
            .index()
            .await
            .map_err(|e| IntelError::TechniqueLookup {
                actor: actor.clone(),
                message: e.to_string(),
            })?;
        Ok(index.techniques_for(&actor))
    }
}
