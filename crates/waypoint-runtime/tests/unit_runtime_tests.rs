//! Unit tests for waypoint-runtime
//!
//! Drives the runtime through its public API: parameter sets, the context,
//! the function library, partition tables and the engine itself

use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use waypoint_core::ir::RESULT_REF_OFFSET;
use waypoint_core::{Program, Value};
use waypoint_runtime::functions;
use waypoint_runtime::{
    Endpoint, PartitionResolver, ResolutionContext, ResolutionTrace, ResolveError, RuleEngine,
    Strictness, Terminal,
};

fn result(index: i64) -> i64 {
    RESULT_REF_OFFSET + index
}

fn load(diagram: serde_json::Value) -> Arc<Program> {
    Arc::new(Program::from_json(&diagram.to_string()).unwrap())
}

fn s3_program() -> Arc<Program> {
    load(json!({
        "version": "1.0",
        "parameters": {
            "Region": {"type": "string", "builtIn": "AWS::Region", "required": true},
            "UseFIPS": {"type": "boolean", "builtIn": "AWS::UseFIPS", "required": true, "default": false},
            "UseDualStack": {"type": "boolean", "required": true, "default": false},
            "Endpoint": {"type": "string", "builtIn": "SDK::Endpoint"},
            "Bucket": {"type": "string"},
            "ForcePathStyle": {
                "type": "boolean",
                "deprecated": {"message": "use virtual hosting", "since": "2020-01-01"}
            }
        },
        "conditions": [
            {"fn": "isSet", "argv": [{"ref": "Endpoint"}]},
            {"fn": "parseURL", "argv": [{"ref": "Endpoint"}], "assign": "url"},
            {"fn": "aws.partition", "argv": [{"ref": "Region"}], "assign": "PartitionResult"},
            {"fn": "booleanEquals", "argv": [{"ref": "UseFIPS"}, true]},
            {"fn": "isSet", "argv": [{"ref": "Bucket"}]},
            {"fn": "aws.isVirtualHostableS3Bucket", "argv": [{"ref": "Bucket"}, false]}
        ],
        "nodes": [
            [0, 3, 4],
            [1, result(0), result(5)],
            [2, 5, result(4)],
            [3, result(1), 6],
            [4, 7, result(3)],
            [5, result(2), result(3)]
        ],
        "root": 2,
        "results": [
            {"type": "endpoint", "url": "{url#scheme}://{url#authority}{url#path}"},
            {"type": "endpoint", "url": "https://s3-fips.{Region}.{PartitionResult#dnsSuffix}"},
            {
                "type": "endpoint",
                "url": "https://{Bucket}.s3.{Region}.{PartitionResult#dnsSuffix}",
                "headers": {"x-amz-bucket": ["{Bucket}"]},
                "properties": {
                    "authSchemes": [{"name": "sigv4", "signingName": "s3", "signingRegion": "{Region}"}]
                }
            },
            {"type": "endpoint", "url": "https://s3.{Region}.{PartitionResult#dnsSuffix}"},
            {"type": "error", "error": "Invalid region: {Region}"},
            {"type": "error", "error": "Custom endpoint `{Endpoint}` was not a valid URI"}
        ]
    }))
}

// ========== Parameter Set Tests ==========

#[test]
fn test_parameter_set_applies_defaults_and_builtins() {
    let program = s3_program();
    let mut builtins = HashMap::new();
    builtins.insert("AWS::Region".to_string(), Value::from("eu-west-1"));
    builtins.insert("AWS::UseFIPS".to_string(), Value::from(true));

    let params = waypoint_runtime::ParameterSet::builder(&program)
        .with_builtins(&builtins)
        .set("UseFIPS", false)
        .build()
        .unwrap();

    assert_eq!(params.get("Region"), Some(&Value::from("eu-west-1")));
    assert_eq!(params.get("UseFIPS"), Some(&Value::Bool(false)));
    assert_eq!(params.get("UseDualStack"), Some(&Value::Bool(false)));
    assert_eq!(params.get("Endpoint"), None);
    assert_eq!(params.len(), 6);
}

#[test]
fn test_parameter_set_rejects_bad_input() {
    let program = s3_program();

    let err = waypoint_runtime::ParameterSet::builder(&program)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::InvalidParameter("missing required parameter `Region`".to_string())
    );

    let err = waypoint_runtime::ParameterSet::builder(&program)
        .set("Region", "us-east-1")
        .set("Bukket", "typo")
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::InvalidParameter("unknown parameter `Bukket`".to_string())
    );

    let err = waypoint_runtime::ParameterSet::builder(&program)
        .set("Region", "us-east-1")
        .set("UseFIPS", "yes")
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::InvalidParameter("parameter `UseFIPS` expects boolean, got string".to_string())
    );
}

#[test]
fn test_deprecated_parameter_is_still_accepted() {
    let program = s3_program();
    let params = waypoint_runtime::ParameterSet::builder(&program)
        .set("Region", "us-east-1")
        .set("ForcePathStyle", true)
        .build()
        .unwrap();
    assert_eq!(params.get("ForcePathStyle"), Some(&Value::Bool(true)));
}

#[test]
fn test_parameter_set_display_in_declaration_order() {
    let program = s3_program();
    let params = waypoint_runtime::ParameterSet::builder(&program)
        .set("Region", "us-east-1")
        .build()
        .unwrap();

    assert_eq!(
        params.to_string(),
        r#"{Region: "us-east-1", UseFIPS: false, UseDualStack: false, Endpoint: <unset>, Bucket: <unset>, ForcePathStyle: <unset>}"#
    );
}

// ========== Context Tests ==========

#[test]
fn test_context_lookup_by_name() {
    let program = s3_program();
    let mut ctx = ResolutionContext::new(program.slot_count());
    assert_eq!(ctx.slot_count(), 2);

    ctx.set(0, Value::from("bound")).unwrap();
    assert_eq!(
        ctx.get_by_name(program.symbols(), "url"),
        Some(&Value::from("bound"))
    );
    assert_eq!(ctx.get_by_name(program.symbols(), "PartitionResult"), None);
    assert_eq!(ctx.get_by_name(program.symbols(), "Region"), None);

    ctx.clear();
    assert_eq!(ctx.bound_count(), 0);
    assert_eq!(ctx.slot_count(), 2);
}

#[test]
fn test_context_slot_out_of_range() {
    let mut ctx = ResolutionContext::new(1);
    assert!(matches!(
        ctx.set(3, Value::Bool(true)),
        Err(ResolveError::MalformedDiagram(_))
    ));
}

// ========== Function Library Tests ==========

#[test]
fn test_public_functions() {
    assert_eq!(functions::substring("abcdef", 0, 3, false), Some("abc".to_string()));
    assert!(functions::is_valid_host_label("us-east-1", false));
    assert!(!functions::is_valid_host_label("a.b", false));
    assert!(functions::is_valid_host_label("a.b", true));
    assert_eq!(functions::uri_encode("a b/c"), "a%20b%2Fc");
    assert_eq!(functions::split("a--b--c", "--", 0), vec!["a", "b", "c"]);

    let url = functions::parse_url("https://example.com:8443/a/b").unwrap();
    assert_eq!(url.authority, "example.com:8443");
    assert_eq!(url.normalized_path, "/a/b/");
    assert!(functions::parse_url("ftp://example.com").is_none());

    let arn = functions::parse_arn("arn:aws:s3:::bucket_name").unwrap();
    assert_eq!(arn.service, "s3");
    assert_eq!(arn.resource_id, vec!["bucket_name".to_string()]);

    assert!(functions::is_virtual_hostable_s3_bucket("my-bucket", false));
    assert!(!functions::is_virtual_hostable_s3_bucket("192.168.1.1", false));
}

// ========== Partition Tests ==========

#[test]
fn test_default_partition_table() {
    let partitions = PartitionResolver::default_shared();

    assert_eq!(partitions.resolve("us-east-1").unwrap().name, "aws");
    assert_eq!(partitions.resolve("cn-northwest-1").unwrap().name, "aws-cn");
    assert_eq!(
        partitions.resolve("cn-northwest-1").unwrap().dns_suffix,
        "amazonaws.com.cn"
    );
    assert_eq!(partitions.resolve("us-gov-east-1").unwrap().name, "aws-us-gov");
    // unknown regions fall back to the aws partition
    assert_eq!(partitions.resolve("mars-central-1").unwrap().name, "aws");
    assert!(Arc::ptr_eq(&partitions, &PartitionResolver::default_shared()));
}

#[test]
fn test_custom_partition_table() {
    let table = json!({
        "partitions": [{
            "id": "aws",
            "regionRegex": "^lab\\-\\w+\\-\\d+$",
            "regions": {"lab-west-1": {"dnsSuffix": "lab.internal"}},
            "outputs": {
                "name": "aws",
                "dnsSuffix": "example.net",
                "dualStackDnsSuffix": "api.example.net",
                "supportsFIPS": false,
                "supportsDualStack": true,
                "implicitGlobalRegion": "lab-east-1"
            }
        }]
    });
    let partitions = Arc::new(PartitionResolver::from_json(&table.to_string()).unwrap());
    assert_eq!(partitions.partition_ids().collect::<Vec<_>>(), vec!["aws"]);

    let engine = RuleEngine::new(s3_program()).with_partitions(partitions);
    let params = engine.params().set("Region", "lab-west-1").build().unwrap();
    assert_eq!(
        engine.resolve(&params).unwrap().url(),
        "https://s3.lab-west-1.lab.internal"
    );

    let params = engine
        .params()
        .set("Region", "lab-east-2")
        .set("Bucket", "logs")
        .build()
        .unwrap();
    assert_eq!(
        engine.resolve(&params).unwrap().url(),
        "https://logs.s3.lab-east-2.example.net"
    );
}

#[test]
fn test_invalid_partition_table() {
    assert!(matches!(
        PartitionResolver::from_json(r#"{"partitions": []}"#),
        Err(ResolveError::InvalidPartitionTable(_))
    ));
    assert!(matches!(
        PartitionResolver::from_json("not json"),
        Err(ResolveError::InvalidPartitionTable(_))
    ));
}

// ========== Engine Tests ==========

#[test]
fn test_s3_resolution_paths() {
    let engine = RuleEngine::new(s3_program());

    let params = engine
        .params()
        .set("Region", "us-west-2")
        .set("Bucket", "my-bucket")
        .build()
        .unwrap();
    let endpoint = engine.resolve(&params).unwrap();
    assert_eq!(endpoint.url(), "https://my-bucket.s3.us-west-2.amazonaws.com");
    assert_eq!(endpoint.header("x-amz-bucket").unwrap(), &["my-bucket".to_string()]);
    assert_eq!(
        endpoint.auth_schemes().unwrap()[0]["signingRegion"],
        json!("us-west-2")
    );

    let params = engine
        .params()
        .set("Region", "us-west-2")
        .set("UseFIPS", true)
        .build()
        .unwrap();
    assert_eq!(
        engine.resolve(&params).unwrap().url(),
        "https://s3-fips.us-west-2.amazonaws.com"
    );

    let params = engine
        .params()
        .set("Region", "us-west-2")
        .set("Endpoint", "http://localhost:9000")
        .build()
        .unwrap();
    assert_eq!(engine.resolve(&params).unwrap().url(), "http://localhost:9000");

    let params = engine
        .params()
        .set("Region", "us-west-2")
        .set("Endpoint", "not a url")
        .build()
        .unwrap();
    let err = engine.resolve(&params).unwrap_err();
    assert!(err.is_resolution_failure());
    assert_eq!(err.to_string(), "Custom endpoint `not a url` was not a valid URI");
}

#[test]
fn test_traced_resolution_serializes() {
    let engine = RuleEngine::new(s3_program());
    let params = engine
        .params()
        .set("Region", "us-west-2")
        .set("Bucket", "my-bucket")
        .build()
        .unwrap();

    let resolution = engine.resolve_traced(&params);
    assert!(resolution.is_match());
    assert_eq!(resolution.trace.evaluated_conditions(), vec![0, 2, 3, 4, 5]);
    assert_eq!(resolution.trace.terminal, Some(Terminal::Result(2)));

    let value = serde_json::to_value(&resolution.trace).unwrap();
    assert_eq!(value["terminal"], json!({"type": "result", "index": 2}));
    let trace: ResolutionTrace = serde_json::from_value(value).unwrap();
    assert_eq!(trace, resolution.trace);
}

#[test]
fn test_endpoint_serializes_without_empty_maps() {
    let engine = RuleEngine::new(s3_program());
    let params = engine.params().set("Region", "us-east-1").build().unwrap();

    let endpoint = engine.resolve(&params).unwrap();
    assert_eq!(
        serde_json::to_value(&endpoint).unwrap(),
        json!({"url": "https://s3.us-east-1.amazonaws.com"})
    );
    let expected = Endpoint::builder()
        .url("https://s3.us-east-1.amazonaws.com")
        .build();
    assert_eq!(endpoint, expected);
}

#[test]
fn test_strict_engine_matches_lenient_on_bound_paths() {
    let lenient = RuleEngine::new(s3_program());
    let strict = RuleEngine::new(s3_program()).with_strictness(Strictness::Strict);

    for region in ["us-east-1", "cn-north-1", "us-gov-west-1"] {
        let params = lenient
            .params()
            .set("Region", region)
            .set("Bucket", "data")
            .build()
            .unwrap();
        assert_eq!(lenient.resolve(&params), strict.resolve(&params));
    }
}

#[test]
fn test_engine_is_shared_across_threads() {
    let engine = Arc::new(RuleEngine::new(s3_program()));
    let regions = ["us-east-1", "eu-west-1", "ap-south-1", "cn-north-1"];

    let handles: Vec<_> = regions
        .iter()
        .map(|region| {
            let engine = Arc::clone(&engine);
            let region = region.to_string();
            thread::spawn(move || {
                engine
                    .params()
                    .set("Region", region.as_str())
                    .build()
                    .and_then(|params| engine.resolve(&params))
                    .map(|endpoint| endpoint.url().to_string())
            })
        })
        .collect();

    let urls: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap().unwrap())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://s3.us-east-1.amazonaws.com",
            "https://s3.eu-west-1.amazonaws.com",
            "https://s3.ap-south-1.amazonaws.com",
            "https://s3.cn-north-1.amazonaws.com.cn",
        ]
    );
}
