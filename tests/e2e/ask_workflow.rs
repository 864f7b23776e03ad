//! E2E Scenario: Interactive ask workflow
//!
//! Drives `cosmorec ask` over stdin: corrections, menus, results and saving.

use super::fixture::E2EFixture;

// Answers, in prompt order:
// options?, brand, [confirm], type, category, price, tags, colors, rating, limit, save?

#[test]
fn test_ask_corrects_brand_and_saves() {
    let mut fixture = E2EFixture::new("ask_corrects_brand_and_saves");

    fixture.log_step("Answer with a misspelled brand and accept the correction");
    let input = "n\nmaybelin\ny\n\n\n\n\n\n4\n2\ny\n";
    let output = fixture.run_cosmorec_with_input(&["ask", "--save-as", "picks"], input);
    fixture.assert_success(&output, "ask");

    fixture.log_step("Verify the correction and the ranked results");
    fixture.assert_output_contains(&output, "===== COSMETIC PRODUCT RECOMMENDATION SYSTEM =====");
    fixture.assert_output_contains(&output, "Loaded 12 products");
    fixture.assert_output_contains(&output, "Did you mean 'maybelline'? (y/n): ");
    fixture.assert_output_contains(&output, "Brand: using 'maybelline' for 'maybelin'");
    fixture.assert_output_contains(&output, "Found 4 matching products");
    fixture.assert_output_contains(&output, "1. Lash Sensational Mascara");
    fixture.assert_output_contains(&output, "2. Great Lash Mascara");
    fixture.assert_output_not_contains(&output, "Color Sensational Lipstick");

    fixture.log_step("Verify the saved file");
    let saved = fixture.output_dir.join("picks.csv");
    fixture.assert_output_contains(&output, "Recommendations saved to");
    assert_eq!(fixture.saved_files(), [saved.clone()]);
    let content = std::fs::read_to_string(saved).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("2,maybelline,Lash Sensational Mascara,"));
    assert!(lines[2].starts_with("1,maybelline,Great Lash Mascara,"));
}

#[test]
fn test_ask_declined_correction_skips_brand() {
    let mut fixture = E2EFixture::new("ask_declined_correction_skips_brand");

    fixture.log_step("Decline the suggested brand");
    let input = "n\nmaybelin\nn\n\n\n\n\n\n\n0\nn\n";
    let output = fixture.run_cosmorec_with_input(&["ask"], input);
    fixture.assert_success(&output, "ask");

    fixture.assert_output_contains(&output, "Brand: 'maybelin' not found in available options; skipping");
    fixture.assert_output_contains(&output, "Found 12 matching products");
    fixture.assert_output_contains(&output, "12. ");
    assert!(fixture.saved_files().is_empty());
}

#[test]
fn test_ask_price_label_tags_and_colors() {
    let mut fixture = E2EFixture::new("ask_price_label_tags_and_colors");

    fixture.log_step("Pick lipsticks in $5-$10 that come in red");
    let input = "n\n\nlipstick\n\n$5-$10\n\nred\n\n0\nn\n";
    let output = fixture.run_cosmorec_with_input(&["ask"], input);
    fixture.assert_success(&output, "ask");

    fixture.assert_output_contains(&output, "1. Under $5");
    fixture.assert_output_contains(&output, "6. Over $30");
    fixture.assert_output_contains(
        &output,
        "Filters applied: Product Type: lipstick | Price Range: $5-$10 | Colors: red",
    );
    fixture.assert_output_contains(&output, "1. Color Sensational Lipstick");
    fixture.assert_output_contains(&output, "2. Soft Matte Lip Cream");
    fixture.assert_output_contains(&output, "... and 2 more");
    fixture.assert_output_not_contains(&output, "Rouge Dior");
}

#[test]
fn test_ask_tag_intersection() {
    let mut fixture = E2EFixture::new("ask_tag_intersection");

    let input = "n\n\n\n\n\nvegan, organic\n\n\n\nn\n";
    let output = fixture.run_cosmorec_with_input(&["ask"], input);
    fixture.assert_success(&output, "ask");

    // "organic" is below the noise floor, so only "vegan" applies.
    fixture.assert_output_contains(&output, "Tags: 'organic' not found in available options; skipping");
    fixture.assert_output_contains(&output, "Found 4 matching products");
}

#[test]
fn test_ask_shows_options() {
    let mut fixture = E2EFixture::new("ask_shows_options");

    let output = fixture.run_cosmorec_with_input(&["ask"], "y\n");
    fixture.assert_success(&output, "ask");

    fixture.assert_output_contains(&output, "===== AVAILABLE OPTIONS =====");
    fixture.assert_output_contains(&output, "Brands (7 total):");
    fixture.assert_output_contains(&output, "Tags (3 total):");
    fixture.assert_output_contains(&output, "Found 12 matching products");
}

#[test]
fn test_ask_no_results_skips_save() {
    let mut fixture = E2EFixture::new("ask_no_results_skips_save");

    let input = "n\ndior\nmascara\n\n\n\n\n5\n\n";
    let output = fixture.run_cosmorec_with_input(&["ask"], input);
    fixture.assert_success(&output, "ask");

    fixture.assert_output_contains(&output, "No products match your criteria. Try adjusting your filters.");
    fixture.assert_output_not_contains(&output, "save these recommendations");
    assert!(fixture.saved_files().is_empty());
}

#[test]
fn test_ask_invalid_rating_and_limit() {
    let mut fixture = E2EFixture::new("ask_invalid_rating_and_limit");

    let input = "n\n\n\n\n\n\n\n9\nlots\nn\n";
    let output = fixture.run_cosmorec_with_input(&["ask"], input);
    fixture.assert_success(&output, "ask");

    fixture.assert_output_contains(&output, "Minimum Rating: rating must be between 1 and 5, got '9'; skipping");
    fixture.assert_output_contains(&output, "Limit: 'lots' is not a whole number; using the default");
    fixture.assert_output_contains(&output, "10. ");
    fixture.assert_output_not_contains(&output, "11. ");
}
