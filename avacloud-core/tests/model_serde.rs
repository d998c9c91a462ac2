use avacloud_core::model::{
    AvaProjectWrapper, ElementDto, Invoice, InvoiceType, ProjectDto, SourceType,
};
use avacloud_core::positions::{project_position_count, project_total_price};
use avacloud_core::workflow::{sample_ava_wrapper, sample_invoice, sample_project};
use serde_json::json;

#[test]
fn unknown_discriminator_becomes_unknown_element() {
    let element: ElementDto = serde_json::from_value(json!({
        "elementTypeDiscriminator": "NoteTextDto",
        "htmlText": "<p>note</p>"
    }))
    .expect("unknown kinds should still parse");

    assert_eq!(element, ElementDto::Unknown);
}

#[test]
fn sample_project_uses_service_wire_format() {
    let value = serde_json::to_value(sample_project()).expect("serialize project");

    assert_eq!(
        value,
        json!({
            "serviceSpecifications": [{
                "totalPrice": 0.0,
                "elements": [{
                    "elementTypeDiscriminator": "PositionDto",
                    "shortText": "Concrete Wall",
                    "unitTag": "m²",
                    "quantityComponents": [{"formula": "10"}],
                    "priceComponents": [{"values": [{"formula": "80"}]}]
                }]
            }]
        })
    );
}

#[test]
fn sample_invoice_serializes_self_source_type() {
    let value = serde_json::to_value(sample_invoice()).expect("serialize invoice");

    assert_eq!(value["sourceType"], "Self");
    assert_eq!(value["invoiceNumber"], "12-34/2024");
    assert_eq!(value["buyer"]["name"], "Dangl IT GmbH");
    assert_eq!(value["totals"]["totalNet"], 100.0);
}

#[test]
fn ava_wrapper_carries_buyer_and_invoice_type() {
    let value = serde_json::to_value(sample_ava_wrapper()).expect("serialize wrapper");

    assert_eq!(value["invoiceType"], "CommercialInvoice");
    assert_eq!(
        value["project"]["projectInformation"]["buyer"]["name"],
        "Dangl IT GmbH"
    );
    let position = &value["project"]["serviceSpecifications"][0]["elements"][0];
    assert_eq!(position["elementTypeDiscriminator"], "PositionDto");
    assert_eq!(position["quantityOverride"], 1.0);
    assert_eq!(position["unitPriceOverride"], 299.95);
}

#[test]
fn served_invoice_and_wrapper_parse() {
    let invoice: Invoice = serde_json::from_value(json!({
        "sourceType": "Other",
        "invoiceNumber": "R-1",
        "invoiceType": "CommercialInvoice",
        "totals": {"totalNet": 250.5, "totalGross": 298.1},
        "seller": {"name": "ignored"}
    }))
    .expect("invoice should parse");
    assert_eq!(invoice.source_type, Some(SourceType::Other));
    assert_eq!(invoice.invoice_type, Some(InvoiceType::CommercialInvoice));
    assert_eq!(invoice.totals.and_then(|t| t.total_net), Some(250.5));

    let wrapper: AvaProjectWrapper = serde_json::from_value(json!({
        "invoiceNumber": "R-1",
        "project": {"serviceSpecifications": [{"totalPrice": 42.0}]}
    }))
    .expect("wrapper should parse");
    let spec = &wrapper.project.service_specifications.expect("specs")[0];
    assert_eq!(spec.total_price, 42.0);
    assert!(spec.elements.is_none());
}

#[test]
fn unrecognised_invoice_and_source_types_parse_as_unknown() {
    let invoice: Invoice = serde_json::from_value(json!({
        "sourceType": "ThirdParty",
        "invoiceNumber": "R-2",
        "invoiceType": "PrepaymentInvoice"
    }))
    .expect("newer enum values should still parse");

    assert_eq!(invoice.source_type, Some(SourceType::Unknown));
    assert_eq!(invoice.invoice_type, Some(InvoiceType::Unknown));
    assert_eq!(invoice.invoice_number.as_deref(), Some("R-2"));
}

#[test]
fn quantity_component_without_formula_still_counts() {
    let project: ProjectDto = serde_json::from_value(json!({
        "serviceSpecifications": [{
            "totalPrice": 12.5,
            "elements": [{
                "elementTypeDiscriminator": "PositionDto",
                "quantityComponents": [{}, {"formula": null}],
                "priceComponents": [{"values": [{"comment": "no formula"}]}]
            }]
        }]
    }))
    .expect("formula-less components should parse");

    assert_eq!(project_position_count(&project), 1);
    match &project.service_specifications.expect("specs")[0]
        .elements
        .as_deref()
        .expect("elements")[0]
    {
        ElementDto::Position(position) => {
            let quantities = position.quantity_components.as_deref().expect("quantities");
            assert!(quantities.iter().all(|q| q.formula.is_none()));
        }
        other => panic!("expected a position, got {other:?}"),
    }
}

#[test]
fn null_total_price_reads_as_zero() {
    let project: ProjectDto = serde_json::from_value(json!({
        "serviceSpecifications": [{"totalPrice": null, "elements": []}]
    }))
    .expect("null totalPrice should parse");

    assert_eq!(project_total_price(&project), 0.0);
}
