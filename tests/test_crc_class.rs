extern crate husk;

use std::rc::Rc;

use husk::runner::api::run_script;
use husk::runner::class::registry::ClassRegistry;
use husk::runner::context::EvalContext;
use husk::runner::ds::error::EngineError;
use husk::runner::ds::object::ObjectRef;
use husk::runner::ds::object_property::PropertyKey;
use husk::runner::ds::operations::get_property;
use husk::runner::ds::value::Value;

fn core_context() -> EvalContext {
    let mut ctx = EvalContext::new();
    ctx.install_classes(ClassRegistry::with_core());
    ctx
}

fn run(source: &str) -> Result<Value, EngineError> {
    let mut ctx = core_context();
    run_script(source, &mut ctx)
}

/// CRC-32 computed from first principles (reflected 0xEDB88320 table), so
/// the engine is checked against an independent reference rather than a
/// memorized constant.
fn reference_crc32(data: &[u8]) -> u32 {
    let mut table = [0u32; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let mut c = i as u32;
        for _ in 0..8 {
            c = if c & 1 != 0 {
                0xEDB8_8320 ^ (c >> 1)
            } else {
                c >> 1
            };
        }
        *entry = c;
    }
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc = table[((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc ^ 0xFFFF_FFFF
}

fn new_crc_instance(ctx: &mut EvalContext) -> ObjectRef {
    let constructor = ctx.class_constructor("Crc").unwrap();
    let instance = constructor.construct(ctx, vec![]).unwrap();
    instance.as_object().unwrap().clone()
}

fn new_byte_array(ctx: &mut EvalContext, data: &[u8]) -> Value {
    let constructor = ctx.class_constructor("Uint8Array").unwrap();
    let elements: Vec<Value> = data.iter().map(|b| Value::Integer(i64::from(*b))).collect();
    constructor
        .construct(ctx, vec![Value::Array(Rc::new(elements))])
        .unwrap()
}

fn checksum_of(ctx: &mut EvalContext, instance: &ObjectRef) -> i64 {
    let value =
        get_property(ctx, instance, &PropertyKey::Str("checksum".to_string())).unwrap();
    match value {
        Value::Integer(i) => i,
        other => panic!("checksum should be an integer, got {:?}", other),
    }
}

fn update_with(ctx: &mut EvalContext, instance: &ObjectRef, data: &[u8]) {
    let update =
        get_property(ctx, instance, &PropertyKey::Str("update".to_string())).unwrap();
    let bytes = new_byte_array(ctx, data);
    match update {
        Value::Function(f) => {
            f.call(ctx, Value::Object(instance.clone()), vec![bytes]).unwrap();
        }
        other => panic!("update should be a function, got {:?}", other),
    }
}

// ── checksum values ──────────────────────────────────────────────────

#[test]
fn test_reference_table_sanity() {
    assert_eq!(reference_crc32(&[1, 2, 3, 4, 5]), 0x470B_99F4);
    assert_eq!(reference_crc32(&[]), 0);
}

#[test]
fn test_fresh_instance_checksum_is_identity() {
    let result = run("const c = new Crc(); c.checksum;").unwrap();
    assert_eq!(result, Value::Integer(0));
}

#[test]
fn test_checksum_matches_reference_for_known_bytes() {
    let result = run(r#"
        const crc = new Crc();
        crc.update(new Uint8Array([1, 2, 3, 4, 5]));
        crc.checksum;
    "#)
    .unwrap();
    assert_eq!(
        result,
        Value::Integer(i64::from(reference_crc32(&[1, 2, 3, 4, 5])))
    );
}

#[test]
fn test_checksum_matches_reference_across_inputs() {
    let inputs: Vec<Vec<u8>> = vec![
        vec![0],
        vec![0xFF; 7],
        b"hello world".to_vec(),
        (0..=255).collect(),
    ];
    for input in inputs {
        let mut ctx = core_context();
        let instance = new_crc_instance(&mut ctx);
        update_with(&mut ctx, &instance, &input);
        assert_eq!(
            checksum_of(&mut ctx, &instance),
            i64::from(reference_crc32(&input)),
            "mismatch for input of {} bytes",
            input.len()
        );
    }
}

#[test]
fn test_incremental_folding_equals_one_shot() {
    let splits: Vec<(Vec<u8>, Vec<u8>)> = vec![
        (vec![1, 2, 3], vec![4, 5]),
        (vec![], b"stream".to_vec()),
        (b"stream".to_vec(), vec![]),
        ((0..128).collect(), (128..=255).collect()),
    ];
    for (first, second) in splits {
        let mut ctx = core_context();

        let incremental = new_crc_instance(&mut ctx);
        update_with(&mut ctx, &incremental, &first);
        update_with(&mut ctx, &incremental, &second);

        let mut concatenated = first.clone();
        concatenated.extend_from_slice(&second);
        let one_shot = new_crc_instance(&mut ctx);
        update_with(&mut ctx, &one_shot, &concatenated);

        assert_eq!(
            checksum_of(&mut ctx, &incremental),
            checksum_of(&mut ctx, &one_shot)
        );
    }
}

#[test]
fn test_checksum_read_does_not_mutate() {
    let mut ctx = core_context();
    let instance = new_crc_instance(&mut ctx);
    update_with(&mut ctx, &instance, &[9, 8, 7]);
    let first = checksum_of(&mut ctx, &instance);
    let second = checksum_of(&mut ctx, &instance);
    assert_eq!(first, second);
}

#[test]
fn test_instances_accumulate_independently() {
    let mut ctx = core_context();
    let left = new_crc_instance(&mut ctx);
    let right = new_crc_instance(&mut ctx);
    update_with(&mut ctx, &left, &[1, 2, 3]);
    update_with(&mut ctx, &right, &[4, 5, 6]);
    assert_eq!(
        checksum_of(&mut ctx, &left),
        i64::from(reference_crc32(&[1, 2, 3]))
    );
    assert_eq!(
        checksum_of(&mut ctx, &right),
        i64::from(reference_crc32(&[4, 5, 6]))
    );
}

// ── construction semantics ───────────────────────────────────────────

#[test]
fn test_plain_call_of_constructor_is_rejected() {
    let result = run("Crc();");
    assert!(matches!(result, Err(EngineError::ConstructorMisuse(_))));
}

#[test]
fn test_plain_call_through_alias_is_rejected() {
    let result = run("const make = Crc; make();");
    assert!(matches!(result, Err(EngineError::ConstructorMisuse(_))));
}

#[test]
fn test_plain_call_via_api_is_rejected() {
    let mut ctx = core_context();
    let constructor = ctx.class_constructor("Crc").unwrap();
    let result = constructor.call(&mut ctx, Value::Undefined, vec![]);
    assert!(matches!(result, Err(EngineError::ConstructorMisuse(_))));
}

// ── prototype guards ─────────────────────────────────────────────────

#[test]
fn test_update_on_prototype_is_a_usage_error() {
    let result = run("Crc.prototype.update(new Uint8Array([1]));");
    assert!(matches!(result, Err(EngineError::PrototypeUsage(_))));
}

#[test]
fn test_checksum_on_prototype_is_a_usage_error() {
    let result = run("Crc.prototype.checksum;");
    assert!(matches!(result, Err(EngineError::PrototypeUsage(_))));
}

#[test]
fn test_prototype_misuse_leaves_instances_untouched() {
    let mut ctx = core_context();
    let instance = new_crc_instance(&mut ctx);
    update_with(&mut ctx, &instance, &[1, 2, 3]);

    let template = ctx.class_template("Crc").unwrap();
    let update =
        get_property(&mut ctx, &template, &PropertyKey::Str("update".to_string())).unwrap();
    let bytes = new_byte_array(&mut ctx, &[0xAA, 0xBB]);
    if let Value::Function(f) = update {
        let result = f.call(&mut ctx, Value::Object(template.clone()), vec![bytes]);
        assert!(matches!(result, Err(EngineError::PrototypeUsage(_))));
    } else {
        panic!("update should be a function");
    }

    assert_eq!(
        checksum_of(&mut ctx, &instance),
        i64::from(reference_crc32(&[1, 2, 3]))
    );
}

// ── update argument validation ───────────────────────────────────────

#[test]
fn test_update_requires_exactly_one_argument() {
    let no_args = run("const c = new Crc(); c.update();");
    assert!(matches!(no_args, Err(EngineError::ArgumentType(_))));

    let two_args = run(
        "const c = new Crc(); c.update(new Uint8Array([1]), new Uint8Array([2]));",
    );
    assert!(matches!(two_args, Err(EngineError::ArgumentType(_))));
}

#[test]
fn test_update_rejects_non_byte_arrays() {
    for source in [
        "const c = new Crc(); c.update(5);",
        "const c = new Crc(); c.update('bytes');",
        // A bare array literal is not a Uint8Array.
        "const c = new Crc(); c.update([1, 2, 3]);",
        "const c = new Crc(); c.update(new Crc());",
    ] {
        let result = run(source);
        assert!(
            matches!(result, Err(EngineError::ArgumentType(_))),
            "expected a type error for: {}",
            source
        );
    }
}

#[test]
fn test_update_rejects_argument_errors_before_folding() {
    let mut ctx = core_context();
    let instance = new_crc_instance(&mut ctx);
    update_with(&mut ctx, &instance, &[1, 2]);

    let update =
        get_property(&mut ctx, &instance, &PropertyKey::Str("update".to_string())).unwrap();
    if let Value::Function(f) = update {
        let result = f.call(
            &mut ctx,
            Value::Object(instance.clone()),
            vec![Value::Integer(3)],
        );
        assert!(matches!(result, Err(EngineError::ArgumentType(_))));
    }

    assert_eq!(
        checksum_of(&mut ctx, &instance),
        i64::from(reference_crc32(&[1, 2]))
    );
}

// ── finalization ─────────────────────────────────────────────────────

#[test]
fn test_finalize_releases_state_exactly_once() {
    let mut ctx = core_context();
    let instance = new_crc_instance(&mut ctx);
    assert!(instance.borrow().has_instance_state());

    instance.borrow_mut().finalize();
    assert!(!instance.borrow().has_instance_state());

    // Idempotent.
    instance.borrow_mut().finalize();
    assert!(!instance.borrow().has_instance_state());
}

#[test]
fn test_finalize_on_template_is_a_noop() {
    let mut ctx = core_context();
    let template = ctx.class_template("Crc").unwrap();
    template.borrow_mut().finalize();
    assert!(template.borrow().is_shared_template());
}

#[test]
fn test_operations_fail_after_release() {
    let mut ctx = core_context();
    let instance = new_crc_instance(&mut ctx);
    instance.borrow_mut().finalize();

    let result = get_property(&mut ctx, &instance, &PropertyKey::Str("checksum".to_string()));
    assert!(matches!(result, Err(EngineError::PrototypeUsage(_))));
}
