//! Purpose: Execute the boundary conformance scenarios against the exported ABI.
//! Exports: None (binary entry point).
//! Role: Reference runner proving the ownership and layout contracts end to end.
//! Invariants: Scenarios run in order; fail-fast with a nonzero exit code.

use std::ffi::CString;

use marrow::abi::{
    mrw_do_thing, mrw_hello_world, mrw_opaque_seq_int_cmp, mrw_opaque_seq_int_free,
    mrw_opaque_seq_int_index, mrw_opaque_seq_int_index_mut, mrw_opaque_seq_int_new,
    mrw_record_free, mrw_record_new, mrw_run_float_hook, mrw_run_int_hook, mrw_run_seq_f64_hook,
    mrw_seq_f64_cmp, mrw_seq_f64_free, mrw_seq_f64_new, mrw_set_int_hook, mrw_startup,
    mrw_str_cmp, mrw_str_free, mrw_str_join, mrw_str_new,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("conformance failure: {err}");
        std::process::exit(1);
    }
    println!("all conformance scenarios passed");
}

fn run() -> Result<(), String> {
    mrw_startup();

    scalars()?;
    join_scenario()?;
    record_scenario()?;
    hook_scenarios()?;
    opaque_scenario()?;
    Ok(())
}

fn scalars() -> Result<(), String> {
    let greeting = CString::new("hello from the native side").map_err(|err| err.to_string())?;
    mrw_hello_world(greeting.as_ptr());
    check(mrw_do_thing(10, 20) == 30, "do_thing(10, 20) must be 30")
}

fn join_scenario() -> Result<(), String> {
    let a = CString::new("hello, ").map_err(|err| err.to_string())?;
    let b = CString::new("world").map_err(|err| err.to_string())?;
    let joined = mrw_str_join(a.as_ptr(), b.as_ptr());
    check(joined.len == 12, "joined length must be 12")?;
    let expected = mrw_str_new(b"hello, world".as_ptr(), 12);
    check(mrw_str_cmp(joined, expected), "joined content mismatch")?;
    mrw_str_free(joined);
    mrw_str_free(expected);
    Ok(())
}

fn record_scenario() -> Result<(), String> {
    let record = mrw_record_new(100);
    let fields = unsafe { &*record };
    check(fields.value == 100, "record scalar field must be 100")?;
    check(
        fields.text.as_bytes() == b"100",
        "record string field must be \"100\"",
    )?;
    mrw_record_free(record);
    Ok(())
}

fn hook_scenarios() -> Result<(), String> {
    check(mrw_run_int_hook(100) == 100, "default int hook must echo")?;
    check(
        mrw_run_float_hook(100.0) == 100.0,
        "default float hook must echo",
    )?;

    extern "C" fn double_it(value: isize) -> isize {
        value * 2
    }
    mrw_set_int_hook(Some(double_it));
    check(mrw_run_int_hook(21) == 42, "replaced int hook must run")?;
    mrw_set_int_hook(None);
    check(mrw_run_int_hook(21) == 21, "null setter must restore default")?;

    let values = [1.0f64, 2.0, 3.0, 4.0];
    let original = mrw_seq_f64_new(values.as_ptr(), values.len() as isize);
    let echoed = mrw_run_seq_f64_hook(original);
    check(
        mrw_seq_f64_cmp(original, echoed),
        "seq hook result must equal input by value",
    )?;
    check(
        original.data != echoed.data,
        "seq hook result must carry a fresh payload",
    )?;
    mrw_seq_f64_free(original);
    mrw_seq_f64_free(echoed);
    Ok(())
}

fn opaque_scenario() -> Result<(), String> {
    let values = [1isize, 2, 3, 4, 5, 6];
    let mut seq = mrw_opaque_seq_int_new(values.as_ptr(), values.len() as isize);
    check(seq.len == 6, "opaque sequence length must be 6")?;

    unsafe { *mrw_opaque_seq_int_index_mut(&mut seq, 0) = 42 };
    check(
        mrw_opaque_seq_int_index(seq, 0) == 42,
        "index 0 must reflect the in-place write",
    )?;
    for i in 1..values.len() {
        check(
            mrw_opaque_seq_int_index(seq, i as isize) == values[i],
            "untouched indices must keep their values",
        )?;
    }

    let twin = mrw_opaque_seq_int_new(values.as_ptr(), values.len() as isize);
    check(
        !mrw_opaque_seq_int_cmp(seq, twin),
        "mutated sequence must no longer equal the source",
    )?;
    mrw_opaque_seq_int_free(seq);
    mrw_opaque_seq_int_free(twin);
    Ok(())
}

fn check(ok: bool, what: &str) -> Result<(), String> {
    if ok { Ok(()) } else { Err(what.to_string()) }
}
