use std::collections::BTreeMap;

use crate::naming::account_number_from_role_arn;
use crate::paths::canonical_path;
use crate::types::ProjectDocument;
use crate::validate::validator::Validator;

pub(crate) fn validate_project(v: &mut Validator, p: &ProjectDocument) {
    v.validate_extensions("$", &p.extensions);

    if p.name.trim().is_empty() {
        v.push("$.name", "must not be empty");
    }

    for (stage, regions) in &p.stages {
        for (region, vars) in regions {
            let path = format!("$.stages.{stage}.{region}");
            v.validate_extensions(&path, &vars.extensions);
            if let Some(arn) = &vars.iam_role_arn_lambda {
                if account_number_from_role_arn(arn).is_err() {
                    v.push(
                        format!("{path}.iamRoleArnLambda"),
                        "must be an IAM role ARN (arn:aws:iam::<account>:role/<name>)",
                    );
                }
            }
        }
    }

    // Two functions claiming the same path+method would overwrite each other's integration.
    let mut owners: BTreeMap<(String, String), &str> = BTreeMap::new();

    for (function_path, f) in &p.functions {
        let fpath = format!("$.functions.{function_path}");
        v.validate_extensions(&fpath, &f.extensions);
        if let Some(name) = &f.deployed_name {
            if name.trim().is_empty() {
                v.push(format!("{fpath}.deployedName"), "must not be empty");
            }
        }

        for (idx, e) in f.endpoints.iter().enumerate() {
            let epath = format!("{fpath}.endpoints[{idx}]");
            v.validate_endpoint(e, &epath);

            if let (Some(path), Some(method)) = (&e.path, &e.method) {
                let key = (canonical_path(path), method.trim().to_ascii_uppercase());
                if let Some(owner) = owners.get(&key) {
                    v.push(
                        epath,
                        format!(
                            "{} {} is already declared by function {owner:?}",
                            key.1, key.0
                        ),
                    );
                } else {
                    owners.insert(key, function_path.as_str());
                }
            }
        }
    }
}
