pub mod view_interface;
