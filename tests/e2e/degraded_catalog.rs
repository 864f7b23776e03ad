//! E2E Scenario: Missing and malformed catalog tables
//!
//! Relation tables degrade the filters that need them; only a missing
//! product table is fatal.

use super::fixture::E2EFixture;

#[test]
fn test_missing_tag_table_disables_tag_filter() {
    let mut fixture = E2EFixture::new("missing_tag_table");
    fixture.remove_table("product_tags.csv");

    fixture.log_step("Tag filter reports unavailable and is skipped");
    let output = fixture.run_cosmorec(&["-m", "recommend", "--tag", "vegan", "--limit", "0"]);
    fixture.assert_success(&output, "recommend");

    let json = output.json();
    assert_eq!(json["matched"], 12);
    assert_eq!(json["notices"][0]["field"], "tags");
    assert_eq!(json["notices"][0]["reason"]["kind"], "unavailable");

    fixture.log_step("Options listing marks tags unavailable");
    let output = fixture.run_cosmorec(&["options"]);
    fixture.assert_success(&output, "options");
    fixture.assert_output_contains(&output, "Tags: not available");
    fixture.assert_output_contains(&output, "Colors (4 total):");
}

#[test]
fn test_ask_skips_unavailable_questions() {
    let mut fixture = E2EFixture::new("ask_skips_unavailable_questions");
    fixture.write_table("product_colors.csv", "product_id,hex_value\n1,#000000\n");

    // options?, brand, type, category, price, tags, rating, limit, save?
    let input = "n\n\n\n\n\n\n\n\nn\n";
    let output = fixture.run_cosmorec_with_input(&["ask"], input);
    fixture.assert_success(&output, "ask");

    fixture.assert_output_contains(&output, "product_colors.csv not available: missing column `colour_name`");
    fixture.assert_output_contains(&output, "Tags (comma-separated): ");
    fixture.assert_output_not_contains(&output, "Colors (comma-separated): ");
}

#[test]
fn test_rows_without_id_are_skipped() {
    let mut fixture = E2EFixture::new("rows_without_id_are_skipped");
    fixture.write_table(
        "products_main.csv",
        "id,brand,name,price,rating\n1,nyx,Lip Liner,3.5,4.0\n,nyx,Ghost,2.0,5.0\n",
    );

    let output = fixture.run_cosmorec_with_input(&["ask"], "n\n");
    fixture.assert_success(&output, "ask");
    fixture.assert_output_contains(&output, "Loaded 1 products");
    fixture.assert_output_contains(&output, "Skipped 1 product rows without an id");
    fixture.assert_output_not_contains(&output, "Ghost");
}

#[test]
fn test_missing_product_table_is_fatal() {
    let mut fixture = E2EFixture::empty("missing_product_table");

    fixture.log_step("Run against an empty data directory");
    let output = fixture.run_cosmorec(&["recommend"]);
    assert!(!output.success);
    assert_eq!(output.exit_code, 1);
    fixture.assert_output_contains(&output, "Product table not found");
    assert!(fixture.data_dir.is_dir(), "data directory should be created");
}

#[test]
fn test_product_table_without_id_column_is_fatal() {
    let fixture = E2EFixture::empty("product_table_without_id");
    fixture.write_table("products_main.csv", "brand,name\nnyx,Lip Liner\n");

    let output = fixture.run_cosmorec(&["-m", "options"]);
    assert!(!output.success);
    let json = output.json();
    assert_eq!(json["status"]["error"]["code"], "CATALOG_SCHEMA_INVALID");
}
