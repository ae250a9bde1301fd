use crate::services::projector::requestable_fields;

pub fn cmd_list_fields() {
    println!("Available fields:");
    for field in requestable_fields() {
        println!("  {field}");
    }
}
