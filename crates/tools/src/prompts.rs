//! Prompt templates for the QA tool handlers.

/// Prompt asking the model to list important child-page links in `html`.
pub fn link_extraction(html: &str) -> String {
    format!(
        "Extract all important links from the following HTML content.\n\
         Focus only on links that represent important child pages or relevant content \
         (not navigation, footer, or utility links).\n\
         Format your response as a simple list of URLs, one per line.\n\
         \n\
         HTML Content:\n\
         {html}\n"
    )
}

/// Prompt asking the model to propose functional/UI test cases for `html`.
pub fn test_case_proposal(html: &str) -> String {
    format!(
        "As a QA engineer, analyze the following HTML content and generate high-quality \
         test cases focusing on functional testing and user interactions.\n\
         \n\
         HTML Content:\n\
         {html}\n\
         \n\
         Generate test cases that cover:\n\
         \n\
         1. Core Functionality\n\
         - Critical user flows and main features\n\
         - Data validation and error handling\n\
         - State management and persistence\n\
         - Form submissions and data processing\n\
         \n\
         2. User Interface\n\
         - Interactive elements (forms, buttons, links)\n\
         - Input validation and constraints\n\
         - Dynamic content and updates\n\
         - User input handling\n\
         \n\
         For each test case, provide a brief description of what to test.\n\
         Format your response as a list of test case descriptions, one per line.\n\
         \n\
         Only generate test cases for elements and functionality that are actually \
         present in the HTML content.\n"
    )
}

/// Prompt asking the model for a Cypress script implementing `test_case`.
pub fn cypress_generation(start_page_url: &str, test_case: &str, relevant_html: &str) -> String {
    format!(
        "You are an expert QA automation engineer. Write a Cypress JS test script for the \
         following test case, starting from the given URL.\n\
         \n\
         Start Page URL: {start_page_url}\n\
         Test Case Description: {test_case}\n\
         \n\
         Requirements:\n\
         - Use Cypress best practices.\n\
         - Add comments to explain each step.\n\
         - Only output valid Cypress JS code (no markdown, no explanations).\n\
         - Use the following HTML content to help you write the test script:\n\
         {relevant_html}\n"
    )
}

/// Prompt asking the model to correct `code` given the failed run `output`.
pub fn cypress_repair(code: &str, output: &str) -> String {
    format!(
        "The following Cypress test code failed when executed. Here is the code:\n\
         ----\n\
         {code}\n\
         ----\n\
         And here is the output from running the test:\n\
         ----\n\
         {output}\n\
         ----\n\
         Please fix the Cypress test code so that it addresses the failure(s). \
         Only output the corrected Cypress JS code (no markdown, no explanations).\n"
    )
}

/// Prompt asking the model for a decorated markdown test plan.
pub fn test_plan(test_name: &str, application_url: &str, test_cases: &[String]) -> String {
    format!(
        "You are an expert QA engineer. Create a comprehensive test plan in markdown format \
         for the following application and test cases.\n\
         \n\
         Test Plan Name: {test_name}\n\
         Application URL: {application_url}\n\
         Test Cases: {test_cases:?}\n\
         \n\
         Requirements:\n\
         - Format as a proper markdown document with headers, lists, and tables where appropriate\n\
         - Include emoticons to improve readability and visual appeal (e.g., ✅ for pass \
         criteria, 🔍 for test steps, etc.)\n\
         - Include the following sections:\n\
         1. Introduction (with emoticons like 📝, 🎯)\n\
         2. Test Objectives (with emoticons like 🎯, 🚀)\n\
         3. Test Environment (with emoticons like 💻, 🌐, 📱)\n\
         4. Test Cases (with emoticons like ✅, ❌, 🔍)\n\
         5. Test Schedule (with emoticons like 📅, ⏱️)\n\
         6. Risk Assessment (with emoticons like ⚠️, 🛑)\n\
         7. Exit Criteria (with emoticons like 🏁, 🎖️)\n\
         - For each test case, include:\n\
         * Test ID\n\
         * Test Description\n\
         * Prerequisites\n\
         * Test Steps with emoticons\n\
         * Expected Results\n\
         * Priority (with appropriate emoticon)\n\
         - Only output valid markdown content (no extra explanations)\n\
         - Be creative with emoticon usage to make the document visually appealing and \
         easy to scan\n"
    )
}
