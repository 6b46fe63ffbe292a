mod arc;
mod boxed;
mod btreemap;
mod rc;
mod vec;
