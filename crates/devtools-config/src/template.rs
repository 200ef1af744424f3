/// Starter `dev.config.yaml` written by `devtools init`
pub const STARTER_CONFIG: &str = r#"# devtools configuration
# Used by `devtools check` (pattern rules) and `devtools manifest` (component index)

# Pattern rules: `devtools check` exits non-zero when any pattern matches.
# `include` entries are globs relative to the project root,
# `exclude` entries are directory names pruned from the search.
patterns:
  - pattern: "console\\.log\\("
    include:
      - "src/**/*.js"
      - "src/**/*.ts"
      - "src/**/*.vue"
    exclude:
      - node_modules
      - dist

  - pattern: "debugger;"
    include:
      - "src/**/*.js"
      - "src/**/*.vue"
    exclude:
      - node_modules

  - pattern: "(?m)^\\s*breakpoint\\(\\)"
    include:
      - "**/*.py"
    exclude:
      - .venv
      - __pycache__

# Component manifest: every file under `components_dir` ending in `extension`
# becomes one `{ name, url }` entry in `output`.
manifest:
  components_dir: pages/dev
  extension: .vue
  route_prefix: /dev/
  indent: 4
  template: ._dev_tools/vue/template/public/dev.html
  template_target: public/dev.html
  output: public/dev_pages.json

# Python linters run by `devtools lint` (mypy, flake8, pylint).
# `ignore_paths` are excluded from every tool and from `--watch`.
python:
  ignore_paths:
    - venv
    - build
  pylint:
    entrance:
      - src
"#;
