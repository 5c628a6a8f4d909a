use svcgraph::core::{ModuleReport, ServiceAnalyzer, ServiceDeclaration};
use svcgraph::formatters::{RenderOptions, SymbolTable, TreeFormatter};

fn unmet_fields_module() -> ModuleReport {
    let report = ServiceAnalyzer::new().analyze(vec![
        ServiceDeclaration::required("svc", "F1"),
        ServiceDeclaration::required("svc", "F2"),
        ServiceDeclaration::required("svc", "F3"),
    ]);
    report.module("svc").unwrap().clone()
}

fn render_module(formatter: &TreeFormatter, module: &ModuleReport) -> String {
    let mut out = String::new();
    formatter.render_module(&mut out, module);
    out
}

#[test]
fn validation_summary_takes_the_terminal_connector() {
    let module = unmet_fields_module();
    let out = render_module(&TreeFormatter::new().with_validation(true), &module);

    let expected = concat!(
        "📦 svc\n",
        "├── 📤 Provides\n",
        "│   └── (none)\n",
        "└── 📥 Requires\n",
        "    ├── F1 ❌ NOT PROVIDED\n",
        "    ├── F2 ❌ NOT PROVIDED\n",
        "    ├── F3 ❌ NOT PROVIDED\n",
        "    └── ⚠️ 3 required field(s) need validation\n",
    );
    assert_eq!(out, expected);
}

#[test]
fn validation_mode_is_silent_when_every_requirement_is_met() {
    let report = ServiceAnalyzer::new().analyze(vec![
        ServiceDeclaration::provided("db", "Database"),
        ServiceDeclaration::provided("cache", "Cache"),
        ServiceDeclaration::required("svc", "Database"),
        ServiceDeclaration::required("svc", "Cache"),
    ]);
    let module = report.module("svc").unwrap();
    let out = render_module(&TreeFormatter::new().with_validation(true), module);

    let expected = concat!(
        "📦 svc\n",
        "├── 📤 Provides\n",
        "│   └── (none)\n",
        "└── 📥 Requires\n",
        "    ├── Database ✅ provided by: db\n",
        "    └── Cache ✅ provided by: cache\n",
    );
    assert_eq!(out, expected);
}

#[test]
fn validation_summary_uses_its_own_glyph() {
    let module = unmet_fields_module();
    let symbols = SymbolTable {
        validation: "VALIDATE".to_string(),
        ..SymbolTable::default()
    };
    let out = render_module(
        &TreeFormatter::new().with_validation(true).with_symbols(symbols),
        &module,
    );

    assert!(out.ends_with("    └── VALIDATE 3 required field(s) need validation\n"));
    assert!(!out.contains("⚠️"));
}

#[test]
fn without_validation_last_field_is_terminal() {
    let module = unmet_fields_module();
    let out = render_module(&TreeFormatter::new(), &module);

    let expected = concat!(
        "📦 svc\n",
        "├── 📤 Provides\n",
        "│   └── (none)\n",
        "└── 📥 Requires\n",
        "    ├── F1 ❌ NOT PROVIDED\n",
        "    ├── F2 ❌ NOT PROVIDED\n",
        "    └── F3 ❌ NOT PROVIDED\n",
    );
    assert_eq!(out, expected);
    assert!(!out.contains("need validation"));
}

#[test]
fn optional_requirements_do_not_trigger_validation_summary() {
    let report = ServiceAnalyzer::new().analyze(vec![
        ServiceDeclaration::provided("svc", "Clock"),
        ServiceDeclaration::required("svc", "Metrics").optional(),
    ]);
    let module = report.module("svc").unwrap();
    let out = render_module(&TreeFormatter::new().with_validation(true), module);

    let expected = concat!(
        "📦 svc\n",
        "├── 📤 Provides\n",
        "│   └── Clock\n",
        "└── 📥 Requires\n",
        "    └── Metrics ✅ not provided (optional)\n",
    );
    assert_eq!(out, expected);
}

#[test]
fn hidden_empty_sections_hand_over_the_terminal_connector() {
    let report = ServiceAnalyzer::new().analyze(vec![
        ServiceDeclaration::provided("db", "Database").with_type("*sql.DB"),
        ServiceDeclaration::provided("db", "Migrator").with_description("schema migrations"),
    ]);
    let module = report.module("db").unwrap();
    let formatter = TreeFormatter::new().with_options(RenderOptions {
        validate: false,
        show_empty_sections: false,
    });
    let out = render_module(&formatter, module);

    let expected = concat!(
        "📦 db\n",
        "└── 📤 Provides\n",
        "    ├── Database (*sql.DB)\n",
        "    └── Migrator - schema migrations\n",
    );
    assert_eq!(out, expected);
}

#[test]
fn ambiguous_requirement_lists_every_provider() {
    let report = ServiceAnalyzer::new().analyze(vec![
        ServiceDeclaration::provided("X", "cache"),
        ServiceDeclaration::provided("Y", "cache"),
        ServiceDeclaration::required("Z", "cache"),
    ]);
    let out = render_module(&TreeFormatter::new(), report.module("Z").unwrap());

    assert!(out.contains("    └── cache ✅ provided by: X, Y\n"));
}

#[test]
fn rejected_providers_are_named() {
    let report = ServiceAnalyzer::new().analyze(vec![
        ServiceDeclaration::provided("buf", "Sink").with_type("*bytes.Buffer"),
        ServiceDeclaration::required("app", "Sink").with_capability("io.Closer"),
    ]);
    let out = render_module(&TreeFormatter::new(), report.module("app").unwrap());

    assert!(out.contains("└── Sink [needs io.Closer] ❌ NOT PROVIDED (rejected: buf)\n"));
}

#[test]
fn full_report_snapshot() {
    let report = ServiceAnalyzer::new().analyze(vec![
        ServiceDeclaration::provided("db", "Database").with_type("*sql.DB"),
        ServiceDeclaration::provided("user", "UserService"),
        ServiceDeclaration::required("user", "Database").with_capability("io.Closer"),
        ServiceDeclaration::required("user", "Cache").optional(),
        ServiceDeclaration::required("api", "UserService"),
        ServiceDeclaration::required("api", "Metrics"),
    ]);
    let out = TreeFormatter::new().with_validation(true).render(&report);

    let expected = concat!(
        "# SERVICE_GRAPH\n",
        "MODULES:3 PROVIDES:2 REQUIRES:4 EDGES:2 CYCLES:0 VIOLATIONS:1\n",
        "\n",
        "📦 db\n",
        "├── 📤 Provides\n",
        "│   └── Database (*sql.DB)\n",
        "└── 📥 Requires\n",
        "    └── (none)\n",
        "\n",
        "📦 user\n",
        "├── 📤 Provides\n",
        "│   └── UserService\n",
        "└── 📥 Requires\n",
        "    ├── Database [needs io.Closer] ✅ provided by: db\n",
        "    └── Cache ✅ not provided (optional)\n",
        "\n",
        "📦 api\n",
        "├── 📤 Provides\n",
        "│   └── (none)\n",
        "└── 📥 Requires\n",
        "    ├── UserService ✅ provided by: user\n",
        "    ├── Metrics ❌ NOT PROVIDED\n",
        "    └── ⚠️ 1 required field(s) need validation\n",
        "\n",
        "🔗 Dependency Graph\n",
        "├── user -> db (via Database)\n",
        "└── api -> user (via UserService)\n",
        "\n",
        "🔍 Capability Checks\n",
        "└── ✅ db: *sql.DB vs io.Closer\n",
        "    └── *sql.DB implements Close() error\n",
        "\n",
        "🔄 Circular Dependencies\n",
        "└── (none)\n",
    );
    assert_eq!(out, expected);
}

#[test]
fn cycles_and_unknown_probes_render_with_ascii_symbols() {
    let report = ServiceAnalyzer::new().analyze(vec![
        ServiceDeclaration::provided("A", "s2").with_type("*a.Impl"),
        ServiceDeclaration::required("A", "s1"),
        ServiceDeclaration::provided("B", "s1"),
        ServiceDeclaration::required("B", "s2").with_capability("b.Port"),
    ]);
    let out = TreeFormatter::new()
        .with_symbols(SymbolTable::ascii())
        .render(&report);

    let expected_tail = concat!(
        "[G] Dependency Graph\n",
        "|-- A -> B (via s1)\n",
        "`-- B -> A (via s2)\n",
        "\n",
        "[C] Capability Checks\n",
        "`-- [?] A: *a.Impl vs b.Port (unknown pattern)\n",
        "    |-- no rule covers `*a.Impl` against `b.Port`\n",
        "    |-- check that `*a.Impl` defines every method in the method set of `b.Port`\n",
        "    |-- methods with pointer receivers only belong to the pointer type's method set\n",
        "    `-- a compile-time assertion `var _ b.Port = (*a.Impl)(nil)` settles it\n",
        "\n",
        "[@] Circular Dependencies\n",
        "`-- A -> B -> A\n",
    );
    assert!(out.starts_with("# SERVICE_GRAPH\nMODULES:2 PROVIDES:2 REQUIRES:2 EDGES:2 CYCLES:1\n\n"));
    assert!(out.ends_with(expected_tail), "unexpected output:\n{out}");
}

#[test]
fn format_to_file_writes_rendered_text() {
    let report = ServiceAnalyzer::new().analyze(vec![ServiceDeclaration::required("A", "X")]);
    let tmp = tempfile::NamedTempFile::new().unwrap();

    TreeFormatter::new().format_to_file(&report, tmp.path()).unwrap();
    let written = std::fs::read_to_string(tmp.path()).unwrap();

    assert_eq!(written, TreeFormatter::new().render(&report));
    assert!(written.contains("X ❌ NOT PROVIDED"));
}
