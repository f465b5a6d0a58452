#![no_main]

use hydro_core::List;
use libfuzzer_sys::fuzz_target;

// Interpret the input as a script of splice operations and apply it to both
// the container and a Vec<u8> model; any divergence or broken invariant is a
// finding.
fuzz_target!(|data: &[u8]| {
  let mut list = List::new(1).unwrap();
  let mut model: Vec<u8> = Vec::new();

  let mut input = data;
  while input.len() >= 4 {
    let (header, rest) = input.split_at(4);
    let op = header[0] % 5;
    let a = header[1] as usize;
    let b = header[2] as usize;
    let take = (header[3] as usize).min(rest.len());
    let (payload, rest) = rest.split_at(take);
    input = rest;

    match op {
      0 => {
        list.push_slice(payload).unwrap();
        model.extend_from_slice(payload);
      },
      1 => {
        let position = a % (model.len() + 1);
        list.insert_slice(position, payload).unwrap();
        model.splice(position..position, payload.iter().copied());
      },
      2 => {
        let position = a % (model.len() + 1);
        let replace = b.min(model.len() - position);
        list.splice(position, replace, payload).unwrap();
        model.splice(position..position + replace, payload.iter().copied());
      },
      3 => {
        let position = a % (model.len() + 1);
        let count = b.min(model.len() - position);
        list.delete(position, count).unwrap();
        model.drain(position..position + count);
      },
      _ => {
        list.clear();
        model.clear();
      },
    }

    assert_eq!(list.as_bytes(), model.as_slice());
    assert!(list.capacity() > list.len());
  }
});
