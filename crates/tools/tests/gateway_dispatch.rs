//! End-to-end dispatch tests against a file-backed registry snapshot.

use std::io::Write;
use std::sync::Arc;

use serde_json::json;

use outreach_registry::PatientRegistry;
use outreach_tools::{create_gateway_registry, DispatchResponse};

fn snapshot_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn validation_round_trip_from_file() {
    let file = snapshot_file(
        r#"{"patients": [
            {
                "Member ID": "M1",
                "Full Name": "Jane Doe",
                "DOB": "1990-01-01",
                "Phone Number": "555-0100",
                "PCP Name": "Dr. Patel",
                "PCP Appointment Date": null
            },
            {
                "Member ID": "M2",
                "Full Name": "Jane Doe",
                "DOB": "1990-01-01",
                "Phone Number": "555-0199",
                "PCP Name": "Dr. Lee",
                "PCP Appointment Date": "2026-09-01"
            }
        ]}"#,
    );
    let registry = create_gateway_registry(Arc::new(PatientRegistry::new(file.path())));

    // First matching row wins; its absent date projects to the literal
    match registry
        .dispatch(
            "validation",
            json!({"full_name": " Jane Doe ", "dob": " 1990-01-01 "}),
        )
        .await
    {
        DispatchResponse::Verdict(body) => {
            assert_eq!(body["valid"], true);
            assert_eq!(body["message"], "Patient validated successfully");
            assert_eq!(body["patient_info"]["member_id"], "M1");
            assert_eq!(body["patient_info"]["pcp_appointment"], "Not scheduled");
        }
        other => panic!("expected verdict, got {:?}", other),
    }

    match registry
        .dispatch(
            "validation",
            json!({"full_name": "Jane Doe", "dob": "1991-01-01"}),
        )
        .await
    {
        DispatchResponse::Verdict(body) => {
            assert_eq!(body["valid"], false);
            assert_eq!(body["message"], "Patient not found in records");
        }
        other => panic!("expected verdict, got {:?}", other),
    }
}

#[tokio::test]
async fn broken_snapshot_surfaces_inside_the_verdict() {
    let file = snapshot_file("{ definitely not json");
    let registry = create_gateway_registry(Arc::new(PatientRegistry::new(file.path())));

    match registry
        .dispatch(
            "validation",
            json!({"full_name": "Jane Doe", "dob": "1990-01-01"}),
        )
        .await
    {
        DispatchResponse::Verdict(body) => {
            assert_eq!(body["valid"], false);
            let message = body["message"].as_str().unwrap();
            assert!(message.starts_with("Error during validation: "));
        }
        other => panic!("expected verdict, got {:?}", other),
    }
}

#[tokio::test]
async fn conversational_tools_accept_a_pending_utterance() {
    let file = snapshot_file(r#"{"patients": []}"#);
    let registry = create_gateway_registry(Arc::new(PatientRegistry::new(file.path())));

    match registry
        .dispatch(
            "pcp_appointment",
            json!({"user_response": "yes, book it"}),
        )
        .await
    {
        DispatchResponse::Success { result } => {
            assert_eq!(result["data"]["status"], "pending_confirmation");
        }
        other => panic!("expected success, got {:?}", other),
    }

    // Same payload against every conversational tool: none may fail raw
    for tool in ["concerns", "benefits", "routing", "sdoh"] {
        match registry
            .dispatch(tool, json!({"user_response": "hello"}))
            .await
        {
            DispatchResponse::Success { result } => {
                assert!(result["message"].is_string(), "tool {} reply", tool)
            }
            other => panic!("tool {} expected success, got {:?}", tool, other),
        }
    }
}
