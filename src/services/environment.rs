use crate::domain::models::EnvVar;
use std::path::Path;

fn prepend(head: String, previous: Option<&str>) -> String {
    match previous {
        Some(p) if !p.is_empty() => format!("{}:{}", head, p),
        _ => head,
    }
}

/// Variables the server build needs to link against an unpacked libtorch.
pub fn build_env(
    libtorch: &Path,
    home: Option<&str>,
    ld_library_path: Option<&str>,
    path: Option<&str>,
) -> Vec<EnvVar> {
    let mut vars = vec![
        EnvVar {
            name: "LIBTORCH".to_string(),
            value: libtorch.to_string_lossy().to_string(),
        },
        EnvVar {
            name: "LD_LIBRARY_PATH".to_string(),
            value: prepend(
                libtorch.join("lib").to_string_lossy().to_string(),
                ld_library_path,
            ),
        },
    ];
    let path = match home {
        Some(h) if !h.is_empty() => Some(prepend(
            Path::new(h).join(".cargo").join("bin").to_string_lossy().to_string(),
            path,
        )),
        _ => path.map(str::to_string),
    };
    if let Some(value) = path {
        vars.push(EnvVar {
            name: "PATH".to_string(),
            value,
        });
    }
    vars
}

/// `build_env` seeded from the current process environment.
pub fn current_build_env(libtorch: &Path) -> Vec<EnvVar> {
    let home = std::env::var("HOME").ok();
    let ld = std::env::var("LD_LIBRARY_PATH").ok();
    let path = std::env::var("PATH").ok();
    build_env(libtorch, home.as_deref(), ld.as_deref(), path.as_deref())
}

pub fn as_pairs(vars: &[EnvVar]) -> Vec<(String, String)> {
    vars.iter()
        .map(|v| (v.name.clone(), v.value.clone()))
        .collect()
}

pub fn shell_export(var: &EnvVar) -> String {
    format!("export {}=\"{}\"", var.name, var.value.replace('"', "\\\""))
}
