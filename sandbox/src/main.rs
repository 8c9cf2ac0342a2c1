use anyhow::Result;
use bizarre_arena::{
    log::{info, logging_thread_join, logging_thread_start, warn},
    memory::{AllocationError, ArenaConfig, TypedArena},
};

const SCRATCH_LEN: usize = 4;

fn run() -> Result<()> {
    let mut scratch = TypedArena::<usize>::with_config(ArenaConfig::for_elements::<usize>(
        SCRATCH_LEN,
    ));
    scratch.init()?;
    info!("Initialized {scratch:?}");

    let first = scratch.alloc(SCRATCH_LEN)?;
    let values = unsafe { &mut *first };
    for (i, value) in values.iter_mut().enumerate() {
        *value = (i + 1) * 100;
    }
    info!("Wrote {:?} at {:p}", unsafe { &*first }, first.cast::<usize>());

    scratch.recycle();

    let second = scratch.alloc(SCRATCH_LEN)?;
    assert_eq!(
        first.cast::<usize>(),
        second.cast::<usize>(),
        "Recycled arena must hand out the same base address"
    );
    info!("Recycled, contents are now {:?}", unsafe { &*second });

    scratch.free();

    match scratch.alloc(1) {
        Err(e) if e.downcast_ref::<AllocationError>() == Some(&AllocationError::NotInitialized) => {
            info!("Freed arena rejects allocations: {e}")
        }
        Err(e) => return Err(e),
        Ok(_) => warn!("Freed arena still handed out memory"),
    }

    Ok(())
}

fn main() -> Result<()> {
    logging_thread_start(None)?;

    let result = run();
    if let Err(e) = &result {
        bizarre_arena::log::error!("Sandbox failed: {e:?}");
    }

    logging_thread_join();
    result
}
