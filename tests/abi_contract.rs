// Boundary contract tests: the exported C surface driven from the native side.
use std::ffi::CString;

use marrow::abi::{
    mrw_do_thing, mrw_opaque_seq_int_assign, mrw_opaque_seq_int_cmp, mrw_opaque_seq_int_free,
    mrw_opaque_seq_int_index, mrw_opaque_seq_int_index_mut, mrw_opaque_seq_int_new,
    mrw_record_free, mrw_record_new, mrw_run_seq_f64_hook, mrw_seq_f64_cmp, mrw_seq_f64_free,
    mrw_seq_f64_new, mrw_str_cmp, mrw_str_free, mrw_str_join, mrw_str_new,
};

fn cstring(text: &str) -> CString {
    CString::new(text).expect("no interior NUL")
}

#[test]
fn do_thing_adds() {
    assert_eq!(mrw_do_thing(10, 20), 30);
}

#[test]
fn join_hello_world_is_twelve_bytes() {
    let a = cstring("hello, ");
    let b = cstring("world");
    let joined = mrw_str_join(a.as_ptr(), b.as_ptr());
    assert_eq!(joined.len, 12);

    let expected = mrw_str_new(b"hello, world".as_ptr(), 12);
    assert!(mrw_str_cmp(joined, expected));
    mrw_str_free(joined);
    mrw_str_free(expected);
}

#[test]
fn str_cmp_is_value_equality() {
    let a = mrw_str_new(b"same".as_ptr(), 4);
    let b = mrw_str_new(b"same".as_ptr(), 4);
    let c = mrw_str_new(b"diff".as_ptr(), 4);
    assert!(!std::ptr::eq(a.data, b.data));
    assert!(mrw_str_cmp(a, b));
    assert!(!mrw_str_cmp(a, c));
    mrw_str_free(a);
    mrw_str_free(b);
    mrw_str_free(c);
}

#[test]
fn empty_strings_compare_equal_and_free_is_a_no_op() {
    let a = mrw_str_new(std::ptr::null(), 0);
    let b = mrw_str_new(b"x".as_ptr(), 0);
    assert!(a.data.is_null());
    assert!(mrw_str_cmp(a, b));
    mrw_str_free(a);
    mrw_str_free(a);
}

#[test]
fn seq_f64_new_copies_in_order() {
    let values = [1.0f64, 2.0, 3.0, 4.0];
    let seq = mrw_seq_f64_new(values.as_ptr(), values.len() as isize);
    assert_eq!(seq.len, 4);
    let elems = unsafe { seq.as_slice() };
    assert_eq!(elems, &values);
    mrw_seq_f64_free(seq);
}

#[test]
fn seq_hook_round_trip_preserves_value_equality() {
    let values = [1.0f64, 2.0, 3.0, 4.0];
    let original = mrw_seq_f64_new(values.as_ptr(), values.len() as isize);
    let result = mrw_run_seq_f64_hook(original);
    assert!(mrw_seq_f64_cmp(original, result));
    assert!(!std::ptr::eq(original.data, result.data));
    mrw_seq_f64_free(original);
    mrw_seq_f64_free(result);
}

#[test]
fn record_round_trip() {
    let record = mrw_record_new(100);
    {
        let fields = unsafe { &*record };
        assert_eq!(fields.value, 100);
        assert_eq!(fields.text.as_bytes(), b"100");
    }
    mrw_record_free(record);
    mrw_record_free(std::ptr::null_mut());
}

#[test]
fn opaque_mutation_is_visible_through_index() {
    let values = [1isize, 2, 3, 4, 5, 6];
    let mut seq = mrw_opaque_seq_int_new(values.as_ptr(), values.len() as isize);
    assert_eq!(seq.len, 6);

    unsafe { *mrw_opaque_seq_int_index_mut(&mut seq, 0) = 42 };
    assert_eq!(mrw_opaque_seq_int_index(seq, 0), 42);
    for i in 1..6 {
        assert_eq!(mrw_opaque_seq_int_index(seq, i), values[i as usize]);
    }
    mrw_opaque_seq_int_free(seq);
}

#[test]
fn opaque_assign_then_index_reads_back() {
    let values = [7isize, 8, 9];
    let mut seq = mrw_opaque_seq_int_new(values.as_ptr(), values.len() as isize);
    mrw_opaque_seq_int_assign(&mut seq, 1, -5);
    assert_eq!(mrw_opaque_seq_int_index(seq, 1), -5);
    assert_eq!(mrw_opaque_seq_int_index(seq, 0), 7);
    assert_eq!(mrw_opaque_seq_int_index(seq, 2), 9);
    mrw_opaque_seq_int_free(seq);
}

#[test]
fn opaque_cmp_matches_contents_not_payloads() {
    let values = [1isize, 2, 3];
    let a = mrw_opaque_seq_int_new(values.as_ptr(), 3);
    let b = mrw_opaque_seq_int_new(values.as_ptr(), 3);
    let shorter = mrw_opaque_seq_int_new(values.as_ptr(), 2);
    assert!(mrw_opaque_seq_int_cmp(a, b));
    assert!(!mrw_opaque_seq_int_cmp(a, shorter));
    mrw_opaque_seq_int_free(a);
    mrw_opaque_seq_int_free(b);
    mrw_opaque_seq_int_free(shorter);
}

#[test]
fn header_copies_alias_the_same_payload() {
    let seq = mrw_seq_f64_new([9.0f64].as_ptr(), 1);
    let alias = seq;
    assert!(std::ptr::eq(seq.data, alias.data));
    assert!(mrw_seq_f64_cmp(seq, alias));
    mrw_seq_f64_free(seq);
}

#[test]
fn null_source_with_positive_len_builds_an_empty_sequence() {
    let seq = mrw_seq_f64_new(std::ptr::null(), 4);
    assert_eq!(seq.len, 0);
    assert!(seq.data.is_null());
    mrw_seq_f64_free(seq);
}
