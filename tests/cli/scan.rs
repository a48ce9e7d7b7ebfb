use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

const CORE_URLS: &str = r#"from django.urls import path

from . import views

app_name = 'core'

urlpatterns = [
    path('accounts/<str:action>/', views.account_action, name='account-action'),  # login, logout
    path('login/', views.login, name='login'),
]
"#;

const CORE_ADMIN: &str = r#"from django.contrib import admin

from .models import Account, Profile

admin.site.register(Account)
admin.site.register(Profile)
"#;

const SITE_URLS: &str = r#"from django.contrib import admin
from django.urls import include, path

urlpatterns = [
    path('admin/', admin.site.urls),
    path('', include('core.urls')),
    path('health/', views.health, name="health"),
]
"#;

fn django_project(test: &CliTest, prefix: &str) -> Result<()> {
    test.write_file(&format!("{prefix}manage.py"), "#!/usr/bin/env python\n")?;
    test.write_file(&format!("{prefix}core/urls.py"), CORE_URLS)?;
    test.write_file(&format!("{prefix}core/admin.py"), CORE_ADMIN)?;
    test.write_file(&format!("{prefix}mysite/urls.py"), SITE_URLS)?;
    Ok(())
}

#[test]
fn test_scan_text_report() -> Result<()> {
    let test = CliTest::new()?;
    django_project(&test, "")?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    .
      core
        core:account-action  (action: string)
        core:login
      ./mysite/urls.py (no app_name)
        health
      models
        core: Account, Profile

    ✓ Found 3 routes and 2 models in 1 project

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_json_report() -> Result<()> {
    let test = CliTest::new()?;
    django_project(&test, "")?;

    assert_cmd_snapshot!(test.scan_command().args(["--format", "json"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    [
      {
        "projectRoot": ".",
        "routes": {
          "core": [
            {
              "name": "account-action",
              "hasArgs": true,
              "args": [
                {
                  "name": "action",
                  "type": "string"
                }
              ],
              "qualifiedViewName": "core:account-action"
            },
            {
              "name": "login",
              "hasArgs": false,
              "args": [],
              "qualifiedViewName": "core:login"
            }
          ],
          "READER_FILE_PATH_./mysite/urls.py": [
            {
              "name": "health",
              "hasArgs": false,
              "args": [],
              "qualifiedViewName": "health"
            }
          ]
        },
        "models": {
          "core": [
            "Account",
            "Profile"
          ]
        }
      }
    ]

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_scan_is_repeatable() -> Result<()> {
    let test = CliTest::new()?;
    django_project(&test, "")?;
    test.write_file("blog/urls.py", "urlpatterns = [path('<int:pk>/', v, name='post')]")?;

    let json = || test.scan_command().args(["--format", "json"]).output();

    assert_eq!(json()?.stdout, json()?.stdout);

    Ok(())
}

#[test]
fn test_not_a_project() -> Result<()> {
    let test = CliTest::with_file("README.md", "# nothing here")?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ Found 0 routes and 0 models in 0 projects (1 warning)

    ----- stderr -----
    warning: No Django project found in .  not-a-project
    ");

    Ok(())
}

#[test]
fn test_explicit_paths_in_order() -> Result<()> {
    let test = CliTest::new()?;
    django_project(&test, "beta/")?;
    django_project(&test, "alpha/")?;
    test.write_file("empty/notes.txt", "")?;

    assert_cmd_snapshot!(test.scan_command().args(["beta", "empty", "alpha"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    beta
      core
        core:account-action  (action: string)
        core:login
      beta/mysite/urls.py (no app_name)
        health
      models
        core: Account, Profile

    alpha
      core
        core:account-action  (action: string)
        core:login
      alpha/mysite/urls.py (no app_name)
        health
      models
        core: Account, Profile

    ✘ Found 6 routes and 4 models in 2 projects (1 warning)

    ----- stderr -----
    warning: No Django project found in empty  not-a-project
    ");

    Ok(())
}

#[test]
fn test_malformed_route_file() -> Result<()> {
    let test = CliTest::new()?;
    django_project(&test, "")?;
    test.write_file(
        "broken/urls.py",
        "app_name = 'broken'\nurlpatterns = [path('x/', views.x))]\n",
    )?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    .
      broken
        (no named routes)
      core
        core:account-action  (action: string)
        core:login
      ./mysite/urls.py (no app_name)
        health
      models
        core: Account, Profile

    ✘ Found 3 routes and 2 models in 1 project (1 warning)

    ----- stderr -----
    warning: Malformed route file ./broken/urls.py: unmatched ')' at byte offset 20  malformed-routes
    ");

    Ok(())
}

#[test]
fn test_project_found_below_root() -> Result<()> {
    let test = CliTest::new()?;
    django_project(&test, "src/backend/")?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ./src/backend
      core
        core:account-action  (action: string)
        core:login
      ./src/backend/mysite/urls.py (no app_name)
        health
      models
        core: Account, Profile

    ✓ Found 3 routes and 2 models in 1 project

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_depth_flags_override_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("site/manage.py", "")?;
    test.write_file(
        "site/blog/urls.py",
        "app_name = 'blog'\nurlpatterns = [path('', v, name='index')]",
    )?;
    test.write_file(".routescoutrc.json", r#"{ "projectDepth": 0 }"#)?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ Found 0 routes and 0 models in 0 projects (1 warning)

    ----- stderr -----
    warning: No Django project found in .  not-a-project
    ");

    assert_cmd_snapshot!(test.scan_command().args(["--project-depth", "1"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ./site
      blog
        blog:index

    ✓ Found 1 route and 0 models in 1 project

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_app_depth_flag() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("manage.py", "")?;
    test.write_file(
        "apps/blog/urls.py",
        "app_name = 'blog'\nurlpatterns = [path('', v, name='index')]",
    )?;

    assert_cmd_snapshot!(test.scan_command().args(["--app-depth", "1"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    .

    ✓ Found 0 routes and 0 models in 1 project

    ----- stderr -----
    ");

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    .
      blog
        blog:index

    ✓ Found 1 route and 0 models in 1 project

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    django_project(&test, "")?;
    test.write_file(
        "legacy_api/urls.py",
        "app_name = 'legacy'\nurlpatterns = [path('', v, name='old')]",
    )?;
    test.write_file(".routescoutrc.json", r#"{ "ignores": ["legacy_*"] }"#)?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    .
      core
        core:account-action  (action: string)
        core:login
      ./mysite/urls.py (no app_name)
        health
      models
        core: Account, Profile

    ✓ Found 3 routes and 2 models in 1 project

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_config_paths() -> Result<()> {
    let test = CliTest::new()?;
    django_project(&test, "backend/")?;
    test.write_file(".routescoutrc.json", r#"{ "paths": ["backend"] }"#)?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    backend
      core
        core:account-action  (action: string)
        core:login
      backend/mysite/urls.py (no app_name)
        health
      models
        core: Account, Profile

    ✓ Found 3 routes and 2 models in 1 project

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    django_project(&test, "")?;
    test.write_file(".routescoutrc.json", r#"{ "ignores": ["[oops"] }"#)?;

    insta::with_settings!({filters => vec![(r"Pattern syntax error .*", "[GLOB ERROR]")]}, {
        assert_cmd_snapshot!(test.scan_command(), @r#"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Invalid glob pattern in 'ignores': "[oops": [GLOB ERROR]
        "#);
    });

    Ok(())
}

#[test]
fn test_verbose_notes_default_config() -> Result<()> {
    let test = CliTest::new()?;
    django_project(&test, "")?;

    assert_cmd_snapshot!(test.scan_command().arg("-v"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    .
      core
        core:account-action  (action: string)
        core:login
      ./mysite/urls.py (no app_name)
        health
      models
        core: Account, Profile

    ✓ Found 3 routes and 2 models in 1 project

    ----- stderr -----
    note: No .routescoutrc.json found, using default configuration
    ");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("scan"));
    assert!(stdout.contains("init"));

    Ok(())
}
