use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::signals::{AGE_MAX_KEY, AGE_MIN_KEY, EVERYONE, UNLIMITED_DISTRIBUTIONS};

/// Class tags of the interventions this crate models with a closed schema.
pub const CLASS_DIAGNOSTIC: &str = "MalariaDiagnostic";
pub const CLASS_BROADCAST: &str = "BroadcastEvent";
pub const CLASS_DISTRIBUTOR: &str = "MultiInterventionDistributor";
pub const CLASS_DELAYED: &str = "DelayedIntervention";

// ── Campaign event ───────────────────────────────────────────────────

/// Root of one campaign entry, as read by the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename = "CampaignEvent")]
pub struct CampaignEvent {
    #[serde(rename = "Start_Day")]
    pub start_day: u32,
    #[serde(rename = "Event_Name")]
    pub event_name: String,
    #[serde(rename = "Nodeset_Config")]
    pub nodeset_config: NodeSet,
    #[serde(rename = "Event_Coordinator_Config")]
    pub event_coordinator_config: EventCoordinator,
}

/// Which nodes an event applies to.
///
/// `NodeSetAll` and `NodeSetNodeList` are typed. Any other selector, or
/// one of those two carrying extra fields, is kept as given.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeSet {
    #[default]
    NodeSetAll,
    NodeSetNodeList {
        node_list: Vec<u32>,
    },
    Opaque(Fragment),
}

const CLASS_NODE_SET_ALL: &str = "NodeSetAll";
const CLASS_NODE_LIST: &str = "NodeSetNodeList";

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeListFields {
    #[serde(rename = "Node_List")]
    node_list: Vec<u32>,
}

impl Serialize for NodeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields = Map::new();
        match self {
            NodeSet::NodeSetAll => {
                fields.insert("class".to_string(), Value::from(CLASS_NODE_SET_ALL));
            }
            NodeSet::NodeSetNodeList { node_list } => {
                fields.insert("class".to_string(), Value::from(CLASS_NODE_LIST));
                fields.insert("Node_List".to_string(), Value::from(node_list.clone()));
            }
            NodeSet::Opaque(fragment) => return fragment.serialize(serializer),
        }
        fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NodeSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let class = fields
            .get("class")
            .and_then(Value::as_str)
            .map(str::to_owned);

        match class.as_deref() {
            Some(CLASS_NODE_SET_ALL) if fields.len() == 1 => Ok(NodeSet::NodeSetAll),
            Some(CLASS_NODE_LIST) => {
                let mut rest = fields.clone();
                rest.remove("class");
                match serde_json::from_value::<NodeListFields>(Value::Object(rest)) {
                    Ok(list) => Ok(NodeSet::NodeSetNodeList {
                        node_list: list.node_list,
                    }),
                    Err(_) => Ok(NodeSet::Opaque(Fragment(fields))),
                }
            }
            _ => Ok(NodeSet::Opaque(Fragment(fields))),
        }
    }
}

// ── Coordinators ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "class",
    rename = "StandardInterventionDistributionEventCoordinator"
)]
pub struct EventCoordinator {
    #[serde(rename = "Number_Distributions")]
    pub number_distributions: i32,
    #[serde(flatten)]
    pub distribution: Distribution,
}

/// The two mutually exclusive repetition mechanisms. A tree never mixes
/// interval repetition with trigger repetition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Distribution {
    Counted(CountedDistribution),
    Triggered {
        #[serde(rename = "Intervention_Config")]
        intervention_config: TriggeredIntervention,
    },
}

/// Fixed number of distributions spaced by a fixed interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountedDistribution {
    #[serde(rename = "Number_Repetitions")]
    pub number_repetitions: u32,
    #[serde(rename = "Timesteps_Between_Repetitions")]
    pub timesteps_between_repetitions: u32,
    #[serde(rename = "Demographic_Coverage")]
    pub demographic_coverage: Number,
    #[serde(flatten)]
    pub targeting: Targeting,
    #[serde(rename = "Property_Restrictions_Within_Node")]
    pub property_restrictions_within_node: Vec<PropertyRestriction>,
    #[serde(rename = "Node_Property_Restrictions")]
    pub node_property_restrictions: Vec<PropertyRestriction>,
    #[serde(rename = "Intervention_Config")]
    pub intervention_config: Intervention,
}

impl EventCoordinator {
    pub fn counted(distribution: CountedDistribution) -> Self {
        Self {
            number_distributions: UNLIMITED_DISTRIBUTIONS,
            distribution: Distribution::Counted(distribution),
        }
    }

    pub fn triggered(intervention: TriggeredIntervention) -> Self {
        Self {
            number_distributions: UNLIMITED_DISTRIBUTIONS,
            distribution: Distribution::Triggered {
                intervention_config: intervention,
            },
        }
    }

    pub fn as_counted(&self) -> Option<&CountedDistribution> {
        match &self.distribution {
            Distribution::Counted(counted) => Some(counted),
            Distribution::Triggered { .. } => None,
        }
    }

    pub fn as_triggered(&self) -> Option<&TriggeredIntervention> {
        match &self.distribution {
            Distribution::Triggered {
                intervention_config,
            } => Some(intervention_config),
            Distribution::Counted(_) => None,
        }
    }

    /// The targeting block that governs who receives the distribution:
    /// the coordinator's own for counted shapes, the triggered
    /// intervention's for triggered ones.
    pub fn targeting_mut(&mut self) -> &mut Targeting {
        match &mut self.distribution {
            Distribution::Counted(counted) => &mut counted.targeting,
            Distribution::Triggered {
                intervention_config,
            } => &mut intervention_config.targeting,
        }
    }

    pub fn targeting(&self) -> &Targeting {
        match &self.distribution {
            Distribution::Counted(counted) => &counted.targeting,
            Distribution::Triggered {
                intervention_config,
            } => &intervention_config.targeting,
        }
    }

    /// The intervention handed to each selected individual.
    pub fn delivered_intervention(&self) -> &Intervention {
        match &self.distribution {
            Distribution::Counted(counted) => &counted.intervention_config,
            Distribution::Triggered {
                intervention_config,
            } => &intervention_config.actual_individual_intervention_config,
        }
    }
}

/// Fires its inner intervention each time a listed event is heard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename = "NodeLevelHealthTriggeredIV")]
pub struct TriggeredIntervention {
    #[serde(rename = "Trigger_Condition_List")]
    pub trigger_condition_list: Vec<String>,
    #[serde(rename = "Target_Residents_Only", with = "crate::serde_int_bool")]
    pub target_residents_only: bool,
    /// Listening window in timesteps; `-1` listens forever.
    #[serde(rename = "Duration")]
    pub duration: i32,
    #[serde(rename = "Demographic_Coverage")]
    pub demographic_coverage: Number,
    #[serde(flatten)]
    pub targeting: Targeting,
    #[serde(rename = "Property_Restrictions_Within_Node")]
    pub property_restrictions_within_node: Vec<PropertyRestriction>,
    #[serde(rename = "Node_Property_Restrictions")]
    pub node_property_restrictions: Vec<PropertyRestriction>,
    #[serde(rename = "Actual_IndividualIntervention_Config")]
    pub actual_individual_intervention_config: Intervention,
}

// ── Targeting ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Targeting {
    #[serde(rename = "Target_Demographic")]
    pub target_demographic: TargetDemographic,
    #[serde(
        rename = "Target_Age_Min",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_age_min: Option<Value>,
    #[serde(
        rename = "Target_Age_Max",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_age_max: Option<Value>,
}

impl Targeting {
    pub fn new(target_demographic: TargetDemographic) -> Self {
        Self {
            target_demographic,
            target_age_min: None,
            target_age_max: None,
        }
    }
}

/// Either a symbolic demographic label or an explicit object such as
/// `{"agemin": 1, "agemax": 5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetDemographic {
    Label(String),
    Explicit(Map<String, Value>),
}

impl TargetDemographic {
    pub fn label(label: impl Into<String>) -> Self {
        TargetDemographic::Label(label.into())
    }

    pub fn age_range(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        let mut range = Map::new();
        range.insert(AGE_MIN_KEY.to_string(), min.into());
        range.insert(AGE_MAX_KEY.to_string(), max.into());
        TargetDemographic::Explicit(range)
    }

    /// `(agemin, agemax)` as given, when this is an explicit object
    /// carrying both keys.
    pub fn age_bounds(&self) -> Option<(&Value, &Value)> {
        match self {
            TargetDemographic::Explicit(range) => {
                Some((range.get(AGE_MIN_KEY)?, range.get(AGE_MAX_KEY)?))
            }
            TargetDemographic::Label(_) => None,
        }
    }
}

impl Default for TargetDemographic {
    fn default() -> Self {
        TargetDemographic::Label(EVERYONE.to_string())
    }
}

/// Key/value filter on individual or node properties, passed through to
/// the simulator untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyRestriction(pub Map<String, Value>);

impl PropertyRestriction {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

// ── Interventions ────────────────────────────────────────────────────

/// Any intervention the builder emits or accepts.
///
/// Classes the builder itself produces are typed; everything else a
/// caller supplies (drugs, vaccines, ...) is carried as an opaque
/// fragment and serialized back exactly as given.
#[derive(Debug, Clone, PartialEq)]
pub enum Intervention {
    Diagnostic(Diagnostic),
    Broadcast(BroadcastEvent),
    Distributor(InterventionDistributor),
    Delayed(DelayedIntervention),
    Opaque(Fragment),
}

impl Intervention {
    pub fn broadcast(event: impl Into<String>) -> Self {
        Intervention::Broadcast(BroadcastEvent {
            broadcast_event: event.into(),
        })
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            Intervention::Diagnostic(_) => Some(CLASS_DIAGNOSTIC),
            Intervention::Broadcast(_) => Some(CLASS_BROADCAST),
            Intervention::Distributor(_) => Some(CLASS_DISTRIBUTOR),
            Intervention::Delayed(_) => Some(CLASS_DELAYED),
            Intervention::Opaque(fragment) => fragment.class(),
        }
    }

    pub fn as_diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Intervention::Diagnostic(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }

    pub fn as_distributor(&self) -> Option<&InterventionDistributor> {
        match self {
            Intervention::Distributor(distributor) => Some(distributor),
            _ => None,
        }
    }

    /// Event name if this is a broadcast.
    pub fn broadcast_event(&self) -> Option<&str> {
        match self {
            Intervention::Broadcast(broadcast) => Some(&broadcast.broadcast_event),
            _ => None,
        }
    }
}

impl Serialize for Intervention {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Intervention::Diagnostic(diagnostic) => diagnostic.serialize(serializer),
            Intervention::Broadcast(broadcast) => broadcast.serialize(serializer),
            Intervention::Distributor(distributor) => distributor.serialize(serializer),
            Intervention::Delayed(delayed) => delayed.serialize(serializer),
            Intervention::Opaque(fragment) => fragment.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Intervention {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let class = fields
            .get("class")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let typed = match class.as_deref() {
            Some(CLASS_DIAGNOSTIC) => {
                serde_json::from_value(Value::Object(fields)).map(Intervention::Diagnostic)
            }
            Some(CLASS_BROADCAST) => {
                serde_json::from_value(Value::Object(fields)).map(Intervention::Broadcast)
            }
            Some(CLASS_DISTRIBUTOR) => {
                serde_json::from_value(Value::Object(fields)).map(Intervention::Distributor)
            }
            Some(CLASS_DELAYED) => {
                serde_json::from_value(Value::Object(fields)).map(Intervention::Delayed)
            }
            _ => return Ok(Intervention::Opaque(Fragment(fields))),
        };
        typed.map_err(D::Error::custom)
    }
}

/// Caller-supplied intervention of a class this crate does not model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fragment(pub Map<String, Value>);

impl Fragment {
    pub fn class(&self) -> Option<&str> {
        self.0.get("class").and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Fragment {
    fn from(fields: Map<String, Value>) -> Self {
        Fragment(fields)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename = "BroadcastEvent")]
pub struct BroadcastEvent {
    #[serde(rename = "Broadcast_Event")]
    pub broadcast_event: String,
}

/// Hands every listed intervention to the same individual at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename = "MultiInterventionDistributor")]
pub struct InterventionDistributor {
    #[serde(rename = "Intervention_List")]
    pub intervention_list: Vec<Intervention>,
    #[serde(
        rename = "Property_Restrictions_Within_Node",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub property_restrictions_within_node: Vec<PropertyRestriction>,
}

impl InterventionDistributor {
    pub fn new(intervention_list: Vec<Intervention>) -> Self {
        Self {
            intervention_list,
            property_restrictions_within_node: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename = "MalariaDiagnostic")]
pub struct Diagnostic {
    #[serde(rename = "Diagnostic_Type")]
    pub diagnostic_type: String,
    /// Parasites per microliter needed for a positive result.
    #[serde(rename = "Detection_Threshold")]
    pub detection_threshold: Number,
    #[serde(flatten)]
    pub outcome: DiagnosisOutcome,
}

/// What a positive result triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Event_Or_Config")]
pub enum DiagnosisOutcome {
    Event {
        #[serde(rename = "Positive_Diagnosis_Event")]
        positive_diagnosis_event: String,
    },
    Config {
        #[serde(rename = "Positive_Diagnosis_Config")]
        positive_diagnosis_config: InterventionDistributor,
    },
}

impl DiagnosisOutcome {
    /// The event finally broadcast on a positive result: the named event
    /// directly, or the trailing broadcast of the follow-up distributor.
    pub fn positive_signal(&self) -> Option<&str> {
        match self {
            DiagnosisOutcome::Event {
                positive_diagnosis_event,
            } => Some(positive_diagnosis_event),
            DiagnosisOutcome::Config {
                positive_diagnosis_config,
            } => positive_diagnosis_config
                .intervention_list
                .last()
                .and_then(Intervention::broadcast_event),
        }
    }
}

/// Waits a fixed or sampled number of timesteps, then distributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename = "DelayedIntervention")]
pub struct DelayedIntervention {
    #[serde(rename = "Coverage")]
    pub coverage: Number,
    #[serde(rename = "Delay_Distribution")]
    pub delay_distribution: String,
    #[serde(rename = "Delay_Period")]
    pub delay_period: u32,
    #[serde(rename = "Actual_IndividualIntervention_Configs")]
    pub actual_individual_intervention_configs: Vec<Intervention>,
}
