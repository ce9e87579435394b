//! Demonstration data for a fresh dashboard

use crate::snapshot::SnapshotRow;
use crate::store::TemplateStore;

fn row(number: i64, title: &str, category: &str, description: &str, code: &str) -> SnapshotRow {
    SnapshotRow {
        number: Some(number),
        title: title.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        code: code.to_string(),
    }
}

/// The five sample templates shown before any data is loaded
pub fn sample_templates() -> Vec<SnapshotRow> {
    vec![
        row(
            1,
            "Login Form",
            "HTML/CSS",
            "Modern login form with validation",
            "<form class=\"login-form\">\n  <input type=\"email\" placeholder=\"Email\">\n  <input type=\"password\" placeholder=\"Password\">\n  <button type=\"submit\">Login</button>\n</form>",
        ),
        row(
            2,
            "Dashboard Layout",
            "React",
            "Responsive dashboard with sidebar",
            "import React from \"react\";\n\nconst Dashboard = () => {\n  return <div className=\"dashboard\">...</div>;\n};",
        ),
        row(
            3,
            "API Endpoint",
            "Python",
            "RESTful API endpoint with authentication",
            "from flask import Flask, jsonify\n\napp = Flask(__name__)\n\n@app.route(\"/api/data\")\ndef get_data():\n    return jsonify({\"status\": \"success\"})",
        ),
        row(
            4,
            "Data Visualization",
            "JavaScript",
            "Interactive chart using D3.js",
            "const data = [10, 20, 30, 40, 50];\nd3.select(\"svg\")\n  .selectAll(\"rect\")\n  .data(data)\n  .enter()\n  .append(\"rect\");",
        ),
        row(
            5,
            "Contact Form",
            "HTML/CSS",
            "Contact form with email integration",
            "<form class=\"contact-form\">\n  <input type=\"text\" placeholder=\"Name\">\n  <input type=\"email\" placeholder=\"Email\">\n  <textarea placeholder=\"Message\"></textarea>\n  <button type=\"submit\">Send</button>\n</form>",
        ),
    ]
}

/// A store holding [`sample_templates`]
pub fn sample_store() -> TemplateStore {
    TemplateStore::from_rows(sample_templates())
}
