mod array;
mod fn_ptr;
mod option;
mod scalar;
