use serde_json::{json, Number, Value};
use survey_ir::signals::TESTED_POSITIVE;
use survey_ir::types::{
    CampaignEvent, CountedDistribution, Diagnostic, DiagnosisOutcome, EventCoordinator,
    Intervention, InterventionDistributor, NodeSet, PropertyRestriction, TargetDemographic,
    Targeting, TriggeredIntervention,
};

fn event_diagnostic() -> Intervention {
    Intervention::Diagnostic(Diagnostic {
        diagnostic_type: "NewDetectionTech".to_string(),
        detection_threshold: Number::from(40),
        outcome: DiagnosisOutcome::Event {
            positive_diagnosis_event: TESTED_POSITIVE.to_string(),
        },
    })
}

#[test]
fn test_diagnostic_serializes_event_variant_flat() {
    let value = serde_json::to_value(event_diagnostic()).unwrap();
    assert_eq!(value["class"], "MalariaDiagnostic");
    assert_eq!(value["Event_Or_Config"], "Event");
    assert_eq!(value["Positive_Diagnosis_Event"], TESTED_POSITIVE);
    assert_eq!(value["Diagnostic_Type"], "NewDetectionTech");
    assert!(value.get("Positive_Diagnosis_Config").is_none());
}

#[test]
fn test_diagnostic_serializes_config_variant() {
    let diagnostic = Intervention::Diagnostic(Diagnostic {
        diagnostic_type: "BLOOD_SMEAR".to_string(),
        detection_threshold: Number::from(5),
        outcome: DiagnosisOutcome::Config {
            positive_diagnosis_config: InterventionDistributor::new(vec![
                Intervention::broadcast(TESTED_POSITIVE),
            ]),
        },
    });
    let value = serde_json::to_value(diagnostic).unwrap();
    assert_eq!(value["Event_Or_Config"], "Config");
    assert_eq!(
        value["Positive_Diagnosis_Config"],
        json!({
            "class": "MultiInterventionDistributor",
            "Intervention_List": [
                { "class": "BroadcastEvent", "Broadcast_Event": "TestedPositive" }
            ]
        })
    );
    assert!(value.get("Positive_Diagnosis_Event").is_none());
}

#[test]
fn test_opaque_fragment_round_trips_unchanged() {
    let raw = json!({
        "class": "AntimalarialDrug",
        "Drug_Type": "Chloroquine",
        "Dosing_Type": "FullTreatmentCourse"
    });
    let intervention: Intervention = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(intervention.class(), Some("AntimalarialDrug"));
    assert_eq!(serde_json::to_value(&intervention).unwrap(), raw);
}

#[test]
fn test_fragment_without_class_is_opaque() {
    let raw = json!({ "Drug_Type": "Primaquine" });
    let intervention: Intervention = serde_json::from_value(raw).unwrap();
    assert!(matches!(intervention, Intervention::Opaque(_)));
    assert_eq!(intervention.class(), None);
}

#[test]
fn test_known_class_with_bad_shape_is_rejected() {
    let raw = json!({ "class": "BroadcastEvent" });
    let parsed: Result<Intervention, _> = serde_json::from_value(raw);
    assert!(parsed.is_err());
}

#[test]
fn test_counted_coordinator_shape() {
    let coordinator = EventCoordinator::counted(CountedDistribution {
        number_repetitions: 4,
        timesteps_between_repetitions: 90,
        demographic_coverage: Number::from_f64(0.7).unwrap(),
        targeting: Targeting::new(TargetDemographic::default()),
        property_restrictions_within_node: vec![],
        node_property_restrictions: vec![PropertyRestriction::from_pairs([("Place", "Urban")])],
        intervention_config: Intervention::broadcast("Received_Test"),
    });
    let value = serde_json::to_value(&coordinator).unwrap();
    assert_eq!(value["class"], "StandardInterventionDistributionEventCoordinator");
    assert_eq!(value["Number_Distributions"], -1);
    assert_eq!(value["Number_Repetitions"], 4);
    assert_eq!(value["Demographic_Coverage"], json!(0.7));
    assert_eq!(value["Timesteps_Between_Repetitions"], 90);
    assert_eq!(value["Target_Demographic"], "Everyone");
    assert!(value.get("Target_Age_Min").is_none());
    assert_eq!(value["Node_Property_Restrictions"], json!([{ "Place": "Urban" }]));
    assert_eq!(value["Property_Restrictions_Within_Node"], json!([]));
}

#[test]
fn test_triggered_coordinator_shape() {
    let coordinator = EventCoordinator::triggered(TriggeredIntervention {
        trigger_condition_list: vec!["Births".to_string()],
        target_residents_only: true,
        duration: -1,
        demographic_coverage: Number::from(1),
        targeting: Targeting::new(TargetDemographic::label("ExplicitAgeRanges")),
        property_restrictions_within_node: vec![],
        node_property_restrictions: vec![],
        actual_individual_intervention_config: event_diagnostic(),
    });
    let value = serde_json::to_value(&coordinator).unwrap();
    assert_eq!(value["Number_Distributions"], -1);
    assert!(value.get("Number_Repetitions").is_none());

    let inner = &value["Intervention_Config"];
    assert_eq!(inner["class"], "NodeLevelHealthTriggeredIV");
    assert_eq!(inner["Trigger_Condition_List"], json!(["Births"]));
    assert_eq!(inner["Target_Residents_Only"], 1);
    assert_eq!(inner["Duration"], -1);
    assert_eq!(inner["Demographic_Coverage"], json!(1));
    assert_eq!(inner["Actual_IndividualIntervention_Config"]["class"], "MalariaDiagnostic");
}

#[test]
fn test_campaign_event_and_node_sets() {
    let event = CampaignEvent {
        start_day: 3,
        event_name: "Survey".to_string(),
        nodeset_config: NodeSet::NodeSetNodeList {
            node_list: vec![7, 9],
        },
        event_coordinator_config: EventCoordinator::triggered(TriggeredIntervention {
            trigger_condition_list: vec!["Births".to_string()],
            target_residents_only: true,
            duration: 10,
            demographic_coverage: Number::from(1),
            targeting: Targeting::new(TargetDemographic::default()),
            property_restrictions_within_node: vec![],
            node_property_restrictions: vec![],
            actual_individual_intervention_config: Intervention::broadcast("X"),
        }),
    };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["class"], "CampaignEvent");
    assert_eq!(value["Start_Day"], 3);
    assert_eq!(
        value["Nodeset_Config"],
        json!({ "class": "NodeSetNodeList", "Node_List": [7, 9] })
    );
    assert_eq!(
        serde_json::to_value(NodeSet::NodeSetAll).unwrap(),
        json!({ "class": "NodeSetAll" })
    );
}

#[test]
fn test_foreign_node_set_passes_through() {
    let raw = json!({ "class": "NodeSetPolygon", "Vertices": "1 2 3" });
    let node_set: NodeSet = serde_json::from_value(raw.clone()).unwrap();
    assert!(matches!(node_set, NodeSet::Opaque(_)));
    assert_eq!(serde_json::to_value(&node_set).unwrap(), raw);
}

#[test]
fn test_node_list_with_extra_fields_is_kept_whole() {
    let raw = json!({ "class": "NodeSetNodeList", "Node_List": [4], "Comment": "clinic" });
    let node_set: NodeSet = serde_json::from_value(raw.clone()).unwrap();
    assert!(matches!(node_set, NodeSet::Opaque(_)));
    assert_eq!(serde_json::to_value(&node_set).unwrap(), raw);

    let plain: NodeSet =
        serde_json::from_value(json!({ "class": "NodeSetNodeList", "Node_List": [4] })).unwrap();
    assert_eq!(plain, NodeSet::NodeSetNodeList { node_list: vec![4] });
    let all: NodeSet = serde_json::from_value(json!({ "class": "NodeSetAll" })).unwrap();
    assert_eq!(all, NodeSet::NodeSetAll);
}

#[test]
fn test_age_bounds_need_both_keys() {
    let range = TargetDemographic::age_range(1, 5);
    assert_eq!(range.age_bounds(), Some((&Value::from(1), &Value::from(5))));

    let partial: TargetDemographic = serde_json::from_value(json!({ "agemin": 1 })).unwrap();
    assert_eq!(partial.age_bounds(), None);

    let textual: TargetDemographic =
        serde_json::from_value(json!({ "agemin": "1", "agemax": 5 })).unwrap();
    assert_eq!(textual.age_bounds(), Some((&json!("1"), &json!(5))));

    assert_eq!(TargetDemographic::default().age_bounds(), None);
}

#[test]
fn test_positive_signal_follows_outcome_variant() {
    let event = DiagnosisOutcome::Event {
        positive_diagnosis_event: TESTED_POSITIVE.to_string(),
    };
    assert_eq!(event.positive_signal(), Some(TESTED_POSITIVE));

    let config = DiagnosisOutcome::Config {
        positive_diagnosis_config: InterventionDistributor::new(vec![
            Intervention::broadcast("Treated"),
            Intervention::broadcast(TESTED_POSITIVE),
        ]),
    };
    assert_eq!(config.positive_signal(), Some(TESTED_POSITIVE));
}
