use ndview::{Array, CompareOp, Range};

fn main() -> ndview::Result<()> {
    // Demo stub: threshold a region of a synthetic ramp and overwrite the hits
    let ramp: Vec<u8> = (0..200).map(|i| (i % 256) as u8).collect();
    let a = Array::from_vec(&[10, 20], 1, ramp)?;

    let roi = a.slice(&[Range::new(0, 4), Range::new(4, -1)])?;
    let mask = roi.compare(CompareOp::Gt, 50)?;
    roi.scatter(&mask, 176.0)?;

    println!(
        "roi={:?} selected={} total_176={}",
        roi.sizes(),
        mask.count(),
        a.compare(CompareOp::Eq, 176)?.count()
    );
    Ok(())
}
